//! Static interest catalogs.
//!
//! Order inside a catalog is the display order and the interleave order used by
//! the mixed fallback, so entries must not be re-sorted. Values are unique
//! within a catalog; the same value may appear in several catalogs.

use serde::Serialize;

/// One selectable interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InterestOption {
    /// Unique id within its catalog; this is what the profile stores.
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'static str>,
}

const fn opt(value: &'static str, label: &'static str, emoji: &'static str) -> InterestOption {
    InterestOption {
        value,
        label,
        emoji: Some(emoji),
    }
}

/// The demographic segment a catalog is curated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    Men,
    Women,
    Boys,
    Girls,
}

impl Catalog {
    /// The catalog's entries in display order.
    pub fn options(self) -> &'static [InterestOption] {
        match self {
            Self::Men => MEN,
            Self::Women => WOMEN,
            Self::Boys => BOYS,
            Self::Girls => GIRLS,
        }
    }

    /// Look up an entry by value.
    pub fn find(self, value: &str) -> Option<&'static InterestOption> {
        self.options().iter().find(|option| option.value == value)
    }
}

static MEN: &[InterestOption] = &[
    opt("tech", "Tech & Gadgets", "💻"),
    opt("gaming", "Gaming", "🎮"),
    opt("golf", "Golf", "⛳"),
    opt("football", "Football", "⚽"),
    opt("fishing", "Fishing", "🎣"),
    opt("bbq", "BBQ & Grilling", "🍖"),
    opt("cars", "Cars & Motoring", "🚗"),
    opt("craft-beer", "Craft Beer", "🍺"),
    opt("whisky", "Whisky", "🥃"),
    opt("coffee", "Coffee", "☕"),
    opt("fitness", "Fitness", "💪"),
    opt("music", "Music", "🎸"),
    opt("movies", "Movies & TV", "🎬"),
    opt("travel", "Travel", "✈️"),
    opt("camping", "Camping & Hiking", "🏕️"),
    opt("diy", "DIY & Tools", "🔧"),
    opt("cooking", "Cooking", "🍳"),
    opt("reading", "Reading", "📚"),
    opt("watches", "Watches", "⌚"),
    opt("grooming", "Grooming", "🪒"),
    opt("cycling", "Cycling", "🚴"),
    opt("board-games", "Board Games", "🎲"),
    opt("photography", "Photography", "📷"),
    opt("sneakers", "Sneakers", "👟"),
];

static WOMEN: &[InterestOption] = &[
    opt("beauty", "Beauty & Makeup", "💄"),
    opt("skincare", "Skincare", "🧴"),
    opt("fashion", "Fashion", "👗"),
    opt("jewellery", "Jewellery", "💍"),
    opt("yoga", "Yoga", "🧘"),
    opt("baking", "Baking", "🧁"),
    opt("wine", "Wine", "🍷"),
    opt("gardening", "Gardening", "🌷"),
    opt("books", "Books", "📖"),
    opt("home-decor", "Home Decor", "🏡"),
    opt("candles", "Candles", "🕯️"),
    opt("wellness", "Wellness & Spa", "💆"),
    opt("tech", "Tech & Gadgets", "💻"),
    opt("coffee", "Coffee", "☕"),
    opt("plants", "Plants", "🪴"),
    opt("art", "Art", "🎨"),
    opt("crafts", "Crafts", "🧶"),
    opt("tea", "Tea", "🍵"),
    opt("handbags", "Handbags", "👜"),
    opt("dance", "Dance", "💃"),
    opt("pilates", "Pilates", "🤸"),
    opt("stationery", "Stationery", "✏️"),
    opt("perfume", "Perfume", "🌸"),
    opt("cooking", "Cooking", "🍳"),
    opt("board-games", "Board Games", "🎲"),
    opt("photography", "Photography", "📷"),
];

static BOYS: &[InterestOption] = &[
    opt("lego", "LEGO & Building", "🧱"),
    opt("gaming", "Gaming", "🎮"),
    opt("dinosaurs", "Dinosaurs", "🦖"),
    opt("football", "Football", "⚽"),
    opt("science-kits", "Science Kits", "🔬"),
    opt("remote-control", "Remote Control", "🚁"),
    opt("superheroes", "Superheroes", "🦸"),
    opt("board-games", "Board Games", "🎲"),
    opt("art-supplies", "Art Supplies", "🖍️"),
    opt("books", "Books", "📖"),
    opt("outdoor-play", "Outdoor Play", "🛝"),
    opt("space", "Space", "🚀"),
];

static GIRLS: &[InterestOption] = &[
    opt("arts-crafts", "Arts & Crafts", "🎨"),
    opt("dolls", "Dolls", "🪆"),
    opt("unicorns", "Unicorns", "🦄"),
    opt("dance", "Dance", "💃"),
    opt("books", "Books", "📖"),
    opt("board-games", "Board Games", "🎲"),
    opt("science-kits", "Science Kits", "🔬"),
    opt("dress-up", "Dress Up", "👑"),
    opt("music", "Music", "🎵"),
    opt("animals", "Animals", "🐶"),
    opt("jewellery-making", "Jewellery Making", "📿"),
    opt("outdoor-play", "Outdoor Play", "🛝"),
];
