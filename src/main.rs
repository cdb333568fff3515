fn main() {
    std::process::exit(mipref_lib::run());
}
