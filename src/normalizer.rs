//! Booru tag normalization.
//!
//! Maps natural-language phrasing and common misspellings onto canonical
//! Danbooru tags, and exposes the semantic variation groups used by smart
//! repetition.

/// One alias group and the canonical tag it collapses to.
#[derive(Debug, Clone, Copy)]
pub struct TagMapping {
    pub inputs: &'static [&'static str],
    pub output: &'static str,
    pub category: &'static str,
}

/// A canonical tag and its interchangeable phrasings.
#[derive(Debug, Clone, Copy)]
pub struct SemanticVariation {
    pub base: &'static str,
    pub variations: &'static [&'static str],
    pub category: &'static str,
}

const fn mapping(
    inputs: &'static [&'static str],
    output: &'static str,
    category: &'static str,
) -> TagMapping {
    TagMapping {
        inputs,
        output,
        category,
    }
}

const fn variation(
    base: &'static str,
    variations: &'static [&'static str],
    category: &'static str,
) -> SemanticVariation {
    SemanticVariation {
        base,
        variations,
        category,
    }
}

pub static TAG_MAPPINGS: &[TagMapping] = &[
    // Anatomy
    mapping(&["big boobs", "huge tits", "oppai", "busty"], "large breasts", "body"),
    mapping(&["flat chested", "no boobs", "flat"], "flat chest", "body"),
    mapping(&["thick thighs", "thicc thighs"], "thick thighs", "body"),
    mapping(&["wide hips", "childbearing hips"], "wide hips", "body"),
    mapping(&["slim", "skinny", "thin"], "slender", "body"),
    mapping(&["fat", "chubby", "plump", "thicc"], "curvy", "body"),
    mapping(&["tall girl", "amazon"], "tall female", "body"),
    mapping(&["short girl", "shortstack"], "short female", "body"),
    mapping(&["big ass", "huge ass", "thicc ass"], "large ass", "body"),
    // Hair colour
    mapping(&["grey hair", "gray hair"], "grey hair", "hair"),
    mapping(&["platinum hair", "platinum blonde"], "platinum blonde hair", "hair"),
    mapping(&["ginger", "ginger hair"], "orange hair", "hair"),
    mapping(&["brunette"], "brown hair", "hair"),
    mapping(&["raven hair", "jet black hair"], "black hair", "hair"),
    mapping(&["strawberry blonde"], "light orange hair", "hair"),
    mapping(&["dirty blonde", "dark blonde"], "dark blonde hair", "hair"),
    // Hair style
    mapping(&["ponytail", "pony tail"], "ponytail", "hair"),
    mapping(&["twin tails", "twintail", "pigtails"], "twintails", "hair"),
    mapping(&["messy hair", "bed head", "bedhead"], "messy hair", "hair"),
    mapping(&["straight hair"], "straight hair", "hair"),
    mapping(&["wavy hair", "waves"], "wavy hair", "hair"),
    mapping(&["curly hair", "curls"], "curly hair", "hair"),
    mapping(&["bob cut", "bob haircut"], "bob cut", "hair"),
    mapping(&["pixie cut", "pixie haircut"], "pixie cut", "hair"),
    mapping(&["braided", "braid"], "braid", "hair"),
    // Hair length
    mapping(&["super long hair", "floor length hair"], "absurdly long hair", "hair"),
    mapping(&["ass length hair", "hip length hair"], "very long hair", "hair"),
    mapping(&["shoulder length hair", "mid length hair"], "medium hair", "hair"),
    mapping(&["neck length hair", "chin length hair"], "short hair", "hair"),
    // Eyes
    mapping(&["crimson eyes", "blood red eyes"], "red eyes", "eyes"),
    mapping(&["golden eyes", "gold eyes"], "yellow eyes", "eyes"),
    mapping(&["ice blue eyes", "sky blue eyes"], "blue eyes", "eyes"),
    mapping(&["forest green eyes", "emerald eyes"], "green eyes", "eyes"),
    mapping(&["purple eyes", "violet eyes"], "purple eyes", "eyes"),
    mapping(&["pink eyes", "rose eyes"], "pink eyes", "eyes"),
    mapping(&["odd eyes", "different colored eyes"], "heterochromia", "eyes"),
    mapping(&["glowing eyes", "glowy eyes"], "glowing eyes", "eyes"),
    // Style
    mapping(&["hsr", "star rail", "starrail"], "honkai: star rail", "style"),
    mapping(&["genshin", "gi", "genshin style"], "genshin impact", "style"),
    mapping(&["hoyoverse", "hoyo", "mihoyo"], "hoyoverse style", "style"),
    mapping(&["zzz", "zenless"], "zenless zone zero", "style"),
    mapping(&["hi3", "honkai 3rd", "honkai impact"], "honkai impact 3rd", "style"),
    mapping(&["anime", "anime style"], "anime style", "style"),
    mapping(&["realistic", "photorealistic"], "photorealistic", "style"),
    mapping(&["semi realistic", "semirealistic"], "semi-realistic", "style"),
    // Pose
    mapping(&["standing up", "stood up"], "standing", "pose"),
    mapping(&["laying down", "laying", "lay down"], "lying", "pose"),
    mapping(&["sitting down", "sat down", "seated"], "sitting", "pose"),
    mapping(&["kneeling down", "on knees"], "kneeling", "pose"),
    mapping(&["crouching", "crouched"], "squatting", "pose"),
    mapping(&["leaning forward", "bending over"], "leaning forward", "pose"),
    mapping(&["arms behind back", "hands behind back"], "arms behind back", "pose"),
    mapping(&["crossed arms", "arms folded"], "crossed arms", "pose"),
    mapping(&["looking back", "glancing back"], "looking back", "pose"),
    mapping(&["over shoulder", "looking over shoulder"], "over shoulder", "pose"),
    // Clothing
    mapping(&["hoodie", "hooded"], "hoodie", "clothing"),
    mapping(&["tshirt", "t shirt"], "t-shirt", "clothing"),
    mapping(&["jeans", "denim pants"], "jeans", "clothing"),
    mapping(&["dress shirt", "button up shirt"], "dress shirt", "clothing"),
    mapping(&["crop top", "cropped top"], "crop top", "clothing"),
    mapping(&["miniskirt", "mini skirt"], "miniskirt", "clothing"),
    mapping(&["thigh highs", "thighhighs"], "thighhighs", "clothing"),
    mapping(&["knee highs", "kneehighs"], "kneehighs", "clothing"),
    mapping(&["bikini armor", "battle bikini"], "bikini armor", "clothing"),
    mapping(&["school uniform", "seifuku"], "school uniform", "clothing"),
    mapping(&["maid outfit", "maid dress"], "maid", "clothing"),
    mapping(&["nurse outfit", "nurse uniform"], "nurse", "clothing"),
    mapping(&["office lady", "ol"], "office lady", "clothing"),
    // Scene
    mapping(&["inside", "interior"], "indoors", "scene"),
    mapping(&["outside", "exterior"], "outdoors", "scene"),
    mapping(&["bedroom", "bed room"], "bedroom", "scene"),
    mapping(&["bathroom", "bath room"], "bathroom", "scene"),
    mapping(&["living room", "livingroom"], "living room", "scene"),
    mapping(&["classroom", "class room"], "classroom", "scene"),
    mapping(&["forest", "woods"], "forest", "scene"),
    mapping(&["beach", "seaside", "shore"], "beach", "scene"),
    mapping(&["city", "urban", "cityscape"], "city", "scene"),
    mapping(&["night time", "nighttime", "at night"], "night", "scene"),
    mapping(&["day time", "daytime"], "day", "scene"),
    mapping(&["sunset", "dusk"], "sunset", "scene"),
    mapping(&["sunrise", "dawn"], "sunrise", "scene"),
    // Composition
    mapping(&["close up", "closeup", "close shot"], "close-up", "composition"),
    mapping(&["full body", "fullbody"], "full body", "composition"),
    mapping(&["upper body", "upperbody", "bust shot"], "upper body", "composition"),
    mapping(&["cowboy shot", "american shot"], "cowboy shot", "composition"),
    mapping(&["from above", "bird eye", "birds eye"], "from above", "composition"),
    mapping(&["from below", "worms eye", "low angle"], "from below", "composition"),
    mapping(&["side view", "profile"], "from side", "composition"),
    mapping(&["front view", "facing viewer"], "facing viewer", "composition"),
    mapping(&["back view", "from behind"], "from behind", "composition"),
    // Lighting
    mapping(&["backlighting", "backlit"], "backlighting", "lighting"),
    mapping(&["rim light", "rimlight"], "rim lighting", "lighting"),
    mapping(&["dramatic light", "cinematic light"], "dramatic lighting", "lighting"),
    mapping(&["soft light", "diffused light"], "soft lighting", "lighting"),
    mapping(&["harsh light", "hard light"], "harsh lighting", "lighting"),
    mapping(&["natural light", "sunlight"], "natural lighting", "lighting"),
    mapping(&["studio light", "studio lighting"], "studio lighting", "lighting"),
    mapping(&["neon light", "neon glow"], "neon lighting", "lighting"),
    // Quality
    mapping(&["hd", "high definition"], "highres", "quality"),
    mapping(&["4k", "ultra hd", "uhd"], "absurdres", "quality"),
    mapping(&["detailed", "high detail"], "detailed", "quality"),
    mapping(&["best quality", "highest quality"], "best quality", "quality"),
    mapping(&["official art", "official artwork"], "official art", "quality"),
];

pub static SEMANTIC_VARIATIONS: &[SemanticVariation] = &[
    variation("large breasts", &["big breasts", "huge breasts"], "body"),
    variation("small breasts", &["petite breasts", "modest chest"], "body"),
    variation("curvy", &["voluptuous", "hourglass figure"], "body"),
    variation("slender", &["slim", "lithe"], "body"),
    variation("muscular", &["athletic", "toned"], "body"),
    variation("thick thighs", &["plump thighs", "thicc thighs"], "body"),
    variation("wide hips", &["broad hips", "curvy hips"], "body"),
    variation("long hair", &["very long hair", "flowing hair"], "hair"),
    variation("short hair", &["cropped hair", "short cut"], "hair"),
    variation("medium hair", &["shoulder length hair", "mid-length hair"], "hair"),
    variation("silver hair", &["grey hair", "white hair"], "hair"),
    variation("blonde hair", &["golden hair", "light hair"], "hair"),
    variation("black hair", &["dark hair", "raven hair"], "hair"),
    variation("red hair", &["crimson hair", "scarlet hair"], "hair"),
    variation("blue hair", &["azure hair", "cobalt hair"], "hair"),
    variation("pink hair", &["rose hair", "magenta hair"], "hair"),
    variation("purple hair", &["violet hair", "lavender hair"], "hair"),
    variation("red eyes", &["crimson eyes", "ruby eyes"], "eyes"),
    variation("blue eyes", &["azure eyes", "sapphire eyes"], "eyes"),
    variation("green eyes", &["emerald eyes", "jade eyes"], "eyes"),
    variation("yellow eyes", &["golden eyes", "amber eyes"], "eyes"),
    variation("purple eyes", &["violet eyes", "amethyst eyes"], "eyes"),
    variation("standing", &["standing up", "upright"], "pose"),
    variation("sitting", &["seated", "sitting down"], "pose"),
    variation("lying", &["lying down", "recumbent"], "pose"),
    variation("dress", &["gown", "frock"], "clothing"),
    variation("armor", &["plate armor", "armored"], "clothing"),
    variation("bikini", &["swimsuit", "two-piece"], "clothing"),
];

pub static TAG_SUGGESTIONS: &[(&str, &[&str])] = &[
    ("silver hair", &["grey hair", "white hair", "platinum blonde hair"]),
    ("long hair", &["very long hair", "waist-length hair", "flowing hair"]),
    ("short hair", &["bob cut", "pixie cut", "cropped hair"]),
    ("blue eyes", &["light blue eyes", "aqua eyes", "azure eyes"]),
    ("red eyes", &["crimson eyes", "ruby eyes", "glowing red eyes"]),
    ("large breasts", &["big breasts", "huge breasts", "busty"]),
    ("armor", &["plate armor", "fantasy armor", "battle armor"]),
    ("dress", &["long dress", "elegant dress", "flowing dress"]),
    ("standing", &["standing up", "full body", "upright pose"]),
    ("sitting", &["seated", "sitting down", "relaxed pose"]),
];

/// Normalizes a single tag.
///
/// Matches the lower-cased, trimmed tag exactly against every alias list.
/// Unknown tags come back trimmed with their original casing.
pub fn normalize(tag: &str) -> String {
    let trimmed = tag.trim();
    let lowered = trimmed.to_lowercase();

    TAG_MAPPINGS
        .iter()
        .find(|mapping| mapping.inputs.contains(&lowered.as_str()))
        .map(|mapping| mapping.output.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Normalizes every tag of a comma-separated prompt.
///
/// Returns the re-joined prompt and a `(before, after)` pair for each tag
/// that changed.
pub fn normalize_tags(prompt: &str) -> (String, Vec<(String, String)>) {
    let mut changes = Vec::new();
    let normalized: Vec<String> = prompt
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| {
            let normalized = normalize(tag);
            if normalized != tag {
                changes.push((tag.to_string(), normalized.clone()));
            }
            normalized
        })
        .collect();

    (normalized.join(", "), changes)
}

/// Other members of the variation group containing `tag`, in table order.
pub fn variations_of(tag: &str) -> Vec<&'static str> {
    let lowered = tag.trim().to_lowercase();

    SEMANTIC_VARIATIONS
        .iter()
        .find(|group| group.base == lowered || group.variations.contains(&lowered.as_str()))
        .map(|group| {
            std::iter::once(group.base)
                .chain(group.variations.iter().copied())
                .filter(|candidate| *candidate != lowered)
                .collect()
        })
        .unwrap_or_default()
}

/// Related tags worth offering next to `tag`.
pub fn suggestions_for(tag: &str) -> &'static [&'static str] {
    let lowered = tag.trim().to_lowercase();
    TAG_SUGGESTIONS
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, suggestions)| *suggestions)
        .unwrap_or(&[])
}
