//! Static tag catalog: category → subcategory → tag records.
//!
//! Tags follow Danbooru naming conventions as understood by NovelAI V4.5.
//! The catalog is read-only; every lookup in [`crate::tags`] walks these
//! tables in declaration order.

use serde::Serialize;

/// One selectable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub text: &'static str,
    pub aliases: &'static [&'static str],
    /// 1 = rare, 5 = very popular.
    pub popularity: u8,
    pub nsfw: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Subcategory {
    pub id: &'static str,
    pub label: &'static str,
    pub nsfw_category: bool,
    pub tags: &'static [TagRecord],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub nsfw_category: bool,
    pub subcategories: &'static [Subcategory],
}

const fn t(text: &'static str, popularity: u8) -> TagRecord {
    TagRecord {
        text,
        aliases: &[],
        popularity,
        nsfw: false,
    }
}

const fn ta(text: &'static str, aliases: &'static [&'static str], popularity: u8) -> TagRecord {
    TagRecord {
        text,
        aliases,
        popularity,
        nsfw: false,
    }
}

const fn nsfw(text: &'static str, popularity: u8) -> TagRecord {
    TagRecord {
        text,
        aliases: &[],
        popularity,
        nsfw: true,
    }
}

const fn sub(id: &'static str, label: &'static str, tags: &'static [TagRecord]) -> Subcategory {
    Subcategory {
        id,
        label,
        nsfw_category: false,
        tags,
    }
}

const fn nsfw_sub(
    id: &'static str,
    label: &'static str,
    tags: &'static [TagRecord],
) -> Subcategory {
    Subcategory {
        id,
        label,
        nsfw_category: true,
        tags,
    }
}

pub static CATEGORIES: &[Category] = &[
    Category {
        id: "character",
        label: "Character",
        icon: "👤",
        nsfw_category: false,
        subcategories: &[
            sub(
                "gender",
                "Gender/Count",
                &[
                    ta("1girl", &["single girl", "one girl"], 5),
                    ta("1boy", &["single boy", "one boy"], 5),
                    t("1other", 3),
                    ta("2girls", &["two girls"], 4),
                    ta("2boys", &["two boys"], 3),
                    t("multiple girls", 4),
                    t("multiple boys", 3),
                    t("solo", 5),
                    t("couple", 3),
                    t("group", 3),
                ],
            ),
            sub(
                "bodyType",
                "Body Type",
                &[
                    ta("slim", &["slender"], 4),
                    ta("petite", &["small"], 4),
                    ta("curvy", &["voluptuous"], 4),
                    ta("muscular", &["athletic", "fit"], 3),
                    t("tall", 3),
                    t("short", 3),
                    t("mature female", 4),
                    t("young woman", 4),
                    t("mature male", 3),
                    t("young man", 3),
                ],
            ),
            sub(
                "species",
                "Species/Race",
                &[
                    t("human", 5),
                    ta("elf", &["elven"], 4),
                    t("pointy ears", 4),
                    ta("kemonomimi", &["animal ears"], 4),
                    ta("cat ears", &["nekomimi"], 5),
                    ta("fox ears", &["kitsune"], 4),
                    t("wolf ears", 3),
                    ta("rabbit ears", &["bunny ears"], 4),
                    t("dog ears", 3),
                    t("demon girl", 3),
                    t("angel", 3),
                    t("vampire", 3),
                    t("dragon girl", 3),
                    t("mermaid", 3),
                    t("fairy", 3),
                    t("ghost", 2),
                    ta("android", &["robot girl"], 3),
                    t("robot", 2),
                ],
            ),
        ],
    },
    Category {
        id: "hair",
        label: "Hair",
        icon: "💇",
        nsfw_category: false,
        subcategories: &[
            sub(
                "color",
                "Hair Color",
                &[
                    ta("blonde hair", &["yellow hair", "golden hair"], 5),
                    t("black hair", 5),
                    t("brown hair", 5),
                    ta("red hair", &["ginger"], 4),
                    t("white hair", 5),
                    t("silver hair", 5),
                    ta("grey hair", &["gray hair"], 3),
                    t("blue hair", 4),
                    t("pink hair", 4),
                    t("purple hair", 4),
                    t("green hair", 3),
                    t("orange hair", 3),
                    t("multicolored hair", 3),
                    t("gradient hair", 3),
                    t("two-tone hair", 3),
                    t("streaked hair", 2),
                ],
            ),
            sub(
                "length",
                "Hair Length",
                &[
                    t("very short hair", 3),
                    t("short hair", 5),
                    t("medium hair", 4),
                    t("long hair", 5),
                    t("very long hair", 4),
                    t("absurdly long hair", 3),
                ],
            ),
            sub(
                "style",
                "Hair Style",
                &[
                    t("straight hair", 4),
                    t("wavy hair", 4),
                    t("curly hair", 3),
                    t("messy hair", 4),
                    t("ponytail", 5),
                    ta("twintails", &["twin tails", "pigtails"], 5),
                    ta("braid", &["braided hair"], 4),
                    t("side braid", 3),
                    t("twin braids", 3),
                    t("french braid", 2),
                    ta("bun", &["hair bun"], 4),
                    t("double bun", 3),
                    t("bob cut", 4),
                    t("pixie cut", 3),
                    t("hime cut", 4),
                    ta("ahoge", &["antenna hair"], 4),
                    t("sidelocks", 4),
                    t("hair over one eye", 4),
                    t("bangs", 4),
                    t("blunt bangs", 4),
                    t("swept bangs", 3),
                    t("parted bangs", 3),
                    t("side bangs", 3),
                    t("hair between eyes", 3),
                    t("side ponytail", 3),
                    t("low ponytail", 3),
                    t("high ponytail", 4),
                    t("hair up", 3),
                    t("hair down", 3),
                    t("hair ornament", 4),
                    t("hairclip", 4),
                    t("hair ribbon", 4),
                    t("hair flower", 3),
                    t("floating hair", 4),
                ],
            ),
        ],
    },
    Category {
        id: "eyes",
        label: "Eyes",
        icon: "👁️",
        nsfw_category: false,
        subcategories: &[
            sub(
                "color",
                "Eye Color",
                &[
                    t("blue eyes", 5),
                    t("red eyes", 5),
                    t("green eyes", 4),
                    t("brown eyes", 4),
                    ta("purple eyes", &["violet eyes"], 4),
                    ta("yellow eyes", &["golden eyes", "amber eyes"], 4),
                    t("pink eyes", 3),
                    t("orange eyes", 3),
                    ta("aqua eyes", &["cyan eyes"], 3),
                    ta("grey eyes", &["gray eyes"], 3),
                    t("black eyes", 3),
                    t("white eyes", 2),
                    t("heterochromia", 4),
                    t("multicolored eyes", 3),
                    t("gradient eyes", 3),
                ],
            ),
            sub(
                "style",
                "Eye Style",
                &[
                    t("detailed eyes", 4),
                    t("sparkling eyes", 3),
                    t("glowing eyes", 3),
                    t("slit pupils", 3),
                    nsfw("heart-shaped pupils", 3),
                    t("symbol-shaped pupils", 2),
                    t("empty eyes", 2),
                    t("closed eyes", 4),
                    t("half-closed eyes", 3),
                    ta("one eye closed", &["wink"], 4),
                ],
            ),
        ],
    },
    Category {
        id: "skin",
        label: "Skin",
        icon: "✋",
        nsfw_category: false,
        subcategories: &[
            sub(
                "tone",
                "Skin Tone",
                &[
                    t("pale skin", 4),
                    t("fair skin", 4),
                    t("light skin", 3),
                    ta("tan", &["tanned"], 3),
                    t("dark skin", 3),
                ],
            ),
            sub(
                "details",
                "Skin Details",
                &[
                    t("freckles", 3),
                    t("mole", 3),
                    t("beauty mark", 3),
                    t("scar", 2),
                    t("tattoo", 3),
                    t("body markings", 2),
                ],
            ),
        ],
    },
    Category {
        id: "clothing",
        label: "Clothing",
        icon: "👗",
        nsfw_category: false,
        subcategories: &[
            sub(
                "tops",
                "Tops",
                &[
                    t("shirt", 4),
                    t("blouse", 3),
                    t("t-shirt", 4),
                    t("sweater", 4),
                    t("hoodie", 4),
                    t("jacket", 4),
                    t("coat", 3),
                    t("cardigan", 3),
                    t("crop top", 4),
                    t("tank top", 4),
                    t("vest", 3),
                    t("cape", 4),
                    t("cloak", 3),
                    t("robe", 3),
                ],
            ),
            sub(
                "bottoms",
                "Bottoms",
                &[
                    t("skirt", 5),
                    t("miniskirt", 4),
                    t("long skirt", 3),
                    t("pleated skirt", 4),
                    ta("pants", &["trousers"], 4),
                    t("jeans", 4),
                    t("shorts", 4),
                    t("short shorts", 3),
                    t("hotpants", 3),
                ],
            ),
            sub(
                "dresses",
                "Dresses",
                &[
                    t("dress", 5),
                    t("white dress", 4),
                    t("black dress", 4),
                    t("red dress", 3),
                    t("long dress", 3),
                    t("short dress", 3),
                    t("sundress", 4),
                    t("wedding dress", 3),
                    ta("gown", &["evening gown", "ball gown"], 3),
                    t("cocktail dress", 2),
                    ta("chinese dress", &["qipao", "cheongsam"], 4),
                    t("kimono", 4),
                    t("yukata", 4),
                    t("hanbok", 2),
                    t("gothic lolita", 3),
                    ta("maid dress", &["maid outfit"], 4),
                ],
            ),
            sub(
                "uniforms",
                "Uniforms",
                &[
                    t("uniform", 4),
                    t("school uniform", 5),
                    ta("serafuku", &["sailor uniform"], 4),
                    t("blazer", 4),
                    t("military uniform", 4),
                    ta("maid", &["maid outfit"], 4),
                    t("nurse outfit", 3),
                    t("butler", 2),
                    t("waitress", 2),
                    t("police uniform", 2),
                ],
            ),
            sub(
                "fantasy",
                "Fantasy/Armor",
                &[
                    t("armor", 4),
                    t("fantasy armor", 4),
                    t("plate armor", 3),
                    t("leather armor", 3),
                    t("knight", 4),
                    t("witch hat", 4),
                    t("crown", 3),
                    t("tiara", 3),
                    t("circlet", 2),
                ],
            ),
            sub(
                "swimwear",
                "Swimwear",
                &[
                    t("swimsuit", 4),
                    t("bikini", 5),
                    t("one-piece swimsuit", 4),
                    t("school swimsuit", 3),
                    t("competition swimsuit", 2),
                ],
            ),
            sub(
                "bodysuits",
                "Bodysuits",
                &[t("bodysuit", 4), t("leotard", 3), t("plugsuit", 2)],
            ),
            sub(
                "casual",
                "Casual",
                &[t("casual clothes", 4), t("suit", 4), t("tuxedo", 2)],
            ),
            sub(
                "details",
                "Clothing Details",
                &[
                    t("frills", 4),
                    t("lace", 4),
                    t("ribbon", 4),
                    t("bow", 4),
                    t("buttons", 3),
                    t("zipper", 2),
                    t("belt", 3),
                    t("ornate", 3),
                    t("simple", 3),
                    t("elegant", 4),
                    t("detailed clothing", 3),
                ],
            ),
            nsfw_sub(
                "underwear",
                "Underwear",
                &[
                    nsfw("underwear", 4),
                    nsfw("bra", 4),
                    nsfw("panties", 4),
                    nsfw("lingerie", 4),
                    nsfw("revealing clothes", 4),
                    nsfw("see-through", 3),
                    nsfw("skimpy", 3),
                ],
            ),
        ],
    },
    Category {
        id: "accessories",
        label: "Accessories",
        icon: "💎",
        nsfw_category: false,
        subcategories: &[
            sub(
                "eyewear",
                "Eyewear",
                &[t("glasses", 4), t("sunglasses", 3), t("monocle", 2)],
            ),
            sub(
                "headwear",
                "Headwear",
                &[
                    t("hat", 4),
                    t("headband", 4),
                    t("headpiece", 3),
                    t("hair bow", 4),
                    t("beret", 3),
                    t("cap", 3),
                    t("hood", 3),
                ],
            ),
            sub(
                "jewelry",
                "Jewelry",
                &[
                    t("earrings", 4),
                    t("necklace", 4),
                    t("choker", 4),
                    t("collar", 3),
                    t("bracelet", 3),
                    t("ring", 3),
                    t("anklet", 2),
                ],
            ),
            sub(
                "handwear",
                "Handwear",
                &[t("gloves", 4), t("fingerless gloves", 3), t("gauntlets", 2)],
            ),
            sub(
                "legwear",
                "Legwear",
                &[
                    ta("thigh highs", &["thighhighs"], 5),
                    t("stockings", 4),
                    t("pantyhose", 3),
                    t("knee highs", 3),
                    t("socks", 4),
                    t("ankle socks", 3),
                ],
            ),
            sub(
                "footwear",
                "Footwear",
                &[
                    t("boots", 4),
                    t("high heels", 4),
                    t("sneakers", 3),
                    t("sandals", 3),
                    t("loafers", 2),
                    t("barefoot", 4),
                ],
            ),
            sub(
                "fantasy",
                "Fantasy Features",
                &[
                    t("wings", 4),
                    t("halo", 3),
                    t("horns", 4),
                    t("tail", 4),
                    t("demon tail", 3),
                    t("cat tail", 4),
                    t("fox tail", 3),
                ],
            ),
        ],
    },
    Category {
        id: "weapons",
        label: "Weapons",
        icon: "⚔️",
        nsfw_category: false,
        subcategories: &[
            sub(
                "melee",
                "Melee Weapons",
                &[
                    t("sword", 5),
                    t("katana", 4),
                    t("rapier", 3),
                    t("dagger", 3),
                    t("knife", 3),
                    t("spear", 3),
                    t("lance", 2),
                    t("scythe", 3),
                    t("axe", 3),
                    t("hammer", 2),
                    t("mace", 2),
                ],
            ),
            sub(
                "ranged",
                "Ranged Weapons",
                &[
                    ta("bow (weapon)", &["bow"], 4),
                    t("crossbow", 2),
                    t("gun", 4),
                    t("pistol", 3),
                    t("rifle", 3),
                    t("sniper rifle", 2),
                ],
            ),
            sub(
                "magical",
                "Magical",
                &[
                    t("staff", 4),
                    t("wand", 3),
                    t("magic", 4),
                    t("casting spell", 3),
                    t("magic circle", 3),
                ],
            ),
            sub("defensive", "Defensive", &[t("shield", 4)]),
            sub(
                "actions",
                "Weapon Actions",
                &[
                    t("holding weapon", 4),
                    t("holding sword", 4),
                    t("aiming", 3),
                    t("drawing weapon", 2),
                ],
            ),
        ],
    },
    Category {
        id: "pose",
        label: "Pose/Action",
        icon: "🎭",
        nsfw_category: false,
        subcategories: &[
            sub(
                "standing",
                "Standing",
                &[
                    t("standing", 5),
                    t("standing on one leg", 3),
                    t("hands on hips", 4),
                    ta("arms crossed", &["crossed arms"], 4),
                    t("hand on hip", 4),
                    ta("hands behind back", &["arms behind back"], 3),
                    t("leaning forward", 3),
                    t("leaning back", 2),
                    t("contrapposto", 2),
                    t("dynamic pose", 4),
                    t("action pose", 4),
                    t("fighting stance", 4),
                    t("confident pose", 3),
                    t("relaxed pose", 3),
                ],
            ),
            sub(
                "sitting",
                "Sitting",
                &[
                    t("sitting", 5),
                    t("sitting on chair", 3),
                    t("sitting on throne", 3),
                    t("sitting on bed", 3),
                    t("sitting on ground", 3),
                    t("seiza", 3),
                    ta("indian style", &["crossed legs sitting"], 3),
                    t("legs crossed", 3),
                    t("legs together", 3),
                    t("kneeling", 4),
                    t("squatting", 3),
                    t("hugging knees", 3),
                ],
            ),
            sub(
                "lying",
                "Lying",
                &[
                    t("lying", 4),
                    ta("lying on back", &["on back"], 4),
                    ta("lying on side", &["on side"], 3),
                    ta("lying on stomach", &["on stomach"], 3),
                    t("reclining", 3),
                    t("sleeping", 3),
                    t("on bed", 3),
                    t("on floor", 2),
                    t("on grass", 3),
                ],
            ),
            sub(
                "arms",
                "Arm Poses",
                &[
                    t("arm up", 4),
                    t("arms up", 4),
                    t("hand on chest", 3),
                    t("hand to own mouth", 3),
                    t("finger to cheek", 3),
                    t("peace sign", 4),
                    t("waving", 3),
                    t("salute", 3),
                    t("reaching out", 3),
                    t("pointing", 3),
                ],
            ),
            sub(
                "action",
                "Action",
                &[
                    t("walking", 3),
                    t("running", 3),
                    t("jumping", 3),
                    t("flying", 3),
                    t("dancing", 3),
                    t("turning around", 2),
                    t("looking back", 4),
                ],
            ),
        ],
    },
    Category {
        id: "expression",
        label: "Expression",
        icon: "😊",
        nsfw_category: false,
        subcategories: &[
            sub(
                "positive",
                "Positive",
                &[
                    t("smile", 5),
                    t("grin", 4),
                    t("smirk", 4),
                    ta("slight smile", &["light smile"], 4),
                    t("gentle smile", 4),
                    t("happy", 4),
                    t("laughing", 3),
                    t("excited", 3),
                ],
            ),
            sub(
                "neutral",
                "Neutral",
                &[
                    ta("expressionless", &["blank expression"], 3),
                    t("serious", 4),
                    t("stoic", 3),
                    t("calm", 3),
                    t("neutral expression", 3),
                    t("thinking", 3),
                    t("pensive", 2),
                ],
            ),
            sub(
                "negative",
                "Negative",
                &[
                    t("sad", 3),
                    t("crying", 3),
                    t("angry", 3),
                    t("annoyed", 3),
                    t("frown", 3),
                    ta("pout", &["pouting"], 4),
                    t("scared", 2),
                    t("worried", 2),
                ],
            ),
            sub(
                "special",
                "Special",
                &[
                    ta("blush", &["blushing"], 5),
                    t("embarrassed", 4),
                    t("shy", 4),
                    t("flustered", 3),
                    t("surprised", 3),
                    t("shocked", 2),
                    t("confused", 2),
                    t("sleepy", 3),
                    t("tired", 2),
                    t("determined", 3),
                    t("confident", 4),
                    t("smug", 4),
                ],
            ),
            sub(
                "mouth",
                "Mouth",
                &[
                    t("open mouth", 4),
                    t("closed mouth", 3),
                    t("parted lips", 3),
                    ta(":d", &["big smile"], 3),
                    ta(":o", &["surprised face"], 3),
                ],
            ),
            sub(
                "looking",
                "Looking Direction",
                &[
                    t("looking at viewer", 5),
                    t("looking away", 4),
                    t("looking to the side", 3),
                    t("looking up", 3),
                    t("looking down", 3),
                    t("looking back", 4),
                    t("eye contact", 4),
                    t("staring", 3),
                    t("glancing", 2),
                ],
            ),
            nsfw_sub(
                "nsfw_expressions",
                "NSFW Expressions",
                &[
                    nsfw("seductive", 4),
                    nsfw("bedroom eyes", 4),
                    nsfw("ahegao", 3),
                ],
            ),
        ],
    },
    Category {
        id: "background",
        label: "Background",
        icon: "🏞️",
        nsfw_category: false,
        subcategories: &[
            sub(
                "simple",
                "Simple",
                &[
                    t("simple background", 5),
                    t("white background", 5),
                    t("black background", 4),
                    ta("grey background", &["gray background"], 3),
                    t("gradient background", 4),
                    t("transparent background", 3),
                    t("two-tone background", 2),
                ],
            ),
            sub(
                "indoor",
                "Indoor",
                &[
                    t("indoors", 4),
                    t("bedroom", 4),
                    t("living room", 3),
                    t("bathroom", 3),
                    t("kitchen", 2),
                    t("hallway", 2),
                    t("classroom", 4),
                    t("library", 3),
                    t("office", 3),
                    t("cafe", 3),
                    t("restaurant", 2),
                    t("bar", 2),
                    t("throne room", 3),
                    t("castle interior", 3),
                    t("temple", 3),
                    t("church", 2),
                    t("laboratory", 2),
                    t("spaceship interior", 2),
                    t("dungeon", 2),
                ],
            ),
            sub(
                "outdoor",
                "Outdoor",
                &[
                    t("outdoors", 4),
                    t("sky", 4),
                    t("clouds", 4),
                    ta("field", &["meadow"], 3),
                    t("forest", 4),
                    ta("mountain", &["mountains"], 3),
                    t("beach", 4),
                    ta("ocean", &["sea"], 3),
                    t("river", 2),
                    t("lake", 2),
                    t("waterfall", 2),
                    t("desert", 2),
                    t("garden", 3),
                    t("park", 3),
                    t("street", 3),
                    ta("city", &["cityscape"], 3),
                    t("rooftop", 3),
                    t("balcony", 2),
                    t("castle", 3),
                    t("ruins", 3),
                    t("snow", 4),
                    t("fantasy setting", 3),
                    t("sci-fi setting", 3),
                ],
            ),
            sub(
                "time",
                "Time of Day",
                &[
                    t("day", 4),
                    t("morning", 3),
                    t("noon", 2),
                    t("afternoon", 3),
                    t("evening", 3),
                    t("night", 4),
                    t("midnight", 2),
                    t("sunset", 4),
                    t("sunrise", 3),
                    t("dusk", 3),
                    t("dawn", 2),
                    t("twilight", 3),
                ],
            ),
            sub(
                "weather",
                "Weather",
                &[
                    t("sunny", 3),
                    t("cloudy", 3),
                    t("overcast", 2),
                    ta("rain", &["rainy"], 4),
                    ta("snow", &["snowy", "snowing"], 4),
                    ta("storm", &["stormy"], 2),
                    ta("fog", &["foggy", "mist", "misty"], 2),
                    ta("wind", &["windy"], 3),
                ],
            ),
        ],
    },
    Category {
        id: "composition",
        label: "Composition",
        icon: "📐",
        nsfw_category: false,
        subcategories: &[
            sub(
                "framing",
                "Framing/Shot",
                &[
                    t("portrait", 4),
                    t("face focus", 4),
                    t("upper body", 5),
                    ta("bust", &["bust shot"], 3),
                    t("cowboy shot", 5),
                    t("full body", 5),
                    t("wide shot", 3),
                    t("close-up", 4),
                    t("extreme close-up", 2),
                    t("feet out of frame", 3),
                    t("head out of frame", 2),
                ],
            ),
            sub(
                "angle",
                "Camera Angle",
                &[
                    t("from above", 4),
                    t("from below", 4),
                    t("from side", 4),
                    t("from behind", 3),
                    t("front view", 4),
                    t("three-quarter view", 3),
                    t("side view", 3),
                    t("back view", 3),
                    t("profile", 4),
                    t("dutch angle", 2),
                    t("fisheye", 2),
                    ta("pov", &["first-person view"], 4),
                ],
            ),
            sub(
                "focus",
                "Focus",
                &[
                    t("character focus", 4),
                    t("solo focus", 4),
                    ta("depth of field", &["dof"], 4),
                    t("blurry background", 4),
                    t("bokeh", 3),
                    t("sharp focus", 3),
                ],
            ),
        ],
    },
    Category {
        id: "style",
        label: "Style",
        icon: "🎨",
        nsfw_category: false,
        subcategories: &[
            sub(
                "lighting",
                "Lighting",
                &[
                    t("natural lighting", 4),
                    t("sunlight", 3),
                    t("soft lighting", 4),
                    t("dramatic lighting", 4),
                    t("cinematic lighting", 4),
                    t("backlighting", 3),
                    t("rim lighting", 3),
                    t("volumetric lighting", 4),
                    ta("god rays", &["light rays", "crepuscular rays"], 3),
                    t("lens flare", 3),
                    t("glow", 3),
                    t("neon lights", 3),
                    t("candlelight", 2),
                    t("firelight", 2),
                    t("moonlight", 3),
                    t("starlight", 2),
                    t("spotlight", 2),
                    t("studio lighting", 3),
                    t("high contrast", 3),
                    t("low key lighting", 2),
                    t("high key lighting", 2),
                    t("chiaroscuro", 2),
                ],
            ),
            sub(
                "effects",
                "Visual Effects",
                &[
                    t("particles", 4),
                    t("sparkles", 4),
                    t("petals", 4),
                    t("cherry blossoms", 4),
                    t("falling leaves", 3),
                    t("bubbles", 3),
                    t("water droplets", 3),
                    t("fire", 3),
                    t("flames", 3),
                    t("smoke", 2),
                    t("lightning", 3),
                    t("electricity", 3),
                    t("aura", 3),
                    t("energy", 3),
                    t("motion blur", 3),
                    t("bloom", 3),
                    t("wind effect", 3),
                    ta("hair blowing", &["floating hair"], 4),
                    t("clothes blowing", 3),
                ],
            ),
            sub(
                "quality",
                "Quality/Aesthetic",
                &[
                    t("masterpiece", 5),
                    t("very aesthetic", 5),
                    t("aesthetic", 4),
                    t("best quality", 4),
                    t("high quality", 4),
                    t("detailed", 4),
                    t("highly detailed", 4),
                    t("extremely detailed", 4),
                    t("intricate", 3),
                    ta("absurdres", &["high resolution"], 3),
                    t("highres", 3),
                    t("no text", 3),
                ],
            ),
            sub(
                "artStyle",
                "Art Style",
                &[
                    ta("anime style", &["anime"], 4),
                    t("manga style", 3),
                    t("illustration", 4),
                    t("digital art", 3),
                    t("concept art", 3),
                    ta("painting", &["painterly"], 3),
                    ta("watercolor", &["watercolor (medium)"], 3),
                    t("oil painting", 2),
                    t("sketch", 3),
                    t("lineart", 3),
                    t("cel shading", 3),
                    t("flat color", 3),
                    t("gradient", 3),
                    t("realistic", 3),
                    t("semi-realistic", 3),
                    t("photorealistic", 2),
                ],
            ),
            sub(
                "year",
                "Year Style",
                &[
                    t("year 2010", 2),
                    t("year 2012", 2),
                    t("year 2014", 2),
                    t("year 2016", 3),
                    t("year 2018", 3),
                    t("year 2020", 4),
                    t("year 2022", 4),
                    t("year 2024", 4),
                ],
            ),
            sub(
                "game",
                "Game Styles",
                &[
                    ta("honkai: star rail", &["hsr"], 4),
                    t("genshin impact", 4),
                    t("honkai impact 3rd", 3),
                    t("game cg", 3),
                    t("official art", 3),
                    t("promotional art", 2),
                    t("key visual", 2),
                    t("splash art", 2),
                ],
            ),
        ],
    },
    Category {
        id: "nsfw",
        label: "NSFW",
        icon: "🔞",
        nsfw_category: true,
        subcategories: &[
            sub(
                "rating",
                "Rating",
                &[
                    t("rating:general", 4),
                    t("rating:sensitive", 4),
                    nsfw("rating:questionable", 3),
                    nsfw("rating:explicit", 4),
                ],
            ),
            nsfw_sub(
                "body",
                "Body Details",
                &[
                    nsfw("large breasts", 5),
                    nsfw("medium breasts", 4),
                    nsfw("small breasts", 4),
                    nsfw("huge breasts", 3),
                    nsfw("cleavage", 4),
                    nsfw("sideboob", 3),
                    nsfw("underboob", 3),
                    nsfw("wide hips", 4),
                    nsfw("thick thighs", 4),
                    nsfw("bare shoulders", 4),
                    nsfw("bare back", 3),
                    nsfw("bare legs", 4),
                    nsfw("midriff", 4),
                    nsfw("navel", 4),
                ],
            ),
            nsfw_sub(
                "state",
                "Clothing State",
                &[
                    nsfw("nude", 5),
                    nsfw("naked", 4),
                    nsfw("topless", 4),
                    nsfw("bottomless", 3),
                    nsfw("partially nude", 3),
                    nsfw("partially clothed", 3),
                    nsfw("undressing", 3),
                    nsfw("clothes lift", 3),
                    nsfw("shirt lift", 3),
                    nsfw("skirt lift", 3),
                ],
            ),
            nsfw_sub(
                "poses",
                "NSFW Poses",
                &[
                    nsfw("lying on bed", 4),
                    nsfw("spread legs", 4),
                    nsfw("on all fours", 3),
                    nsfw("bent over", 3),
                    nsfw("arched back", 3),
                    nsfw("sensual", 4),
                    nsfw("provocative", 3),
                    nsfw("presenting", 3),
                ],
            ),
        ],
    },
];

/// Looks up a category by id.
pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}

/// Looks up a subcategory by category and subcategory id.
pub fn subcategory(category_id: &str, subcategory_id: &str) -> Option<&'static Subcategory> {
    category(category_id)?
        .subcategories
        .iter()
        .find(|sub| sub.id == subcategory_id)
}
