//! Compiled-in quiz content.
//!
//! Eleven questions, each offering every style once in declared order
//! (A = first style, B = second, ...). Sessions shuffle on top of this.

use crate::domain::{
    slugify, Letter, Material, MaterialType, MediaCategory, MediaRef, Question, QuizOption,
    RoomType, Style, StyleMaterials, StyleUniverse,
};

use super::{ContentSource, Loaded};

struct StyleDef {
    name: &'static str,
    description: &'static str,
    history: &'static str,
    characteristics: &'static [&'static str],
    design_tips: &'static [&'static str],
    color_palette: &'static [&'static str],
    metals: &'static [&'static str],
    wood_finishes: &'static [&'static str],
}

struct QuestionDef {
    prompt: &'static str,
    room: &'static str,
    /// Appended to the style name for lifestyle image lookups
    image_hint: Option<&'static str>,
}

const STYLES: [StyleDef; 8] = [
    StyleDef {
        name: "French Country",
        description: "You're drawn to the romantic charm of French countryside living, where every element tells a story of timeless elegance and rustic sophistication. Your style embraces soft, weathered textures and vintage treasures collected over time.",
        history: "Originating in the French countryside during the 17th-18th centuries, this style emerged from rural farmhouses and provincial homes. It reflects the rustic elegance of French rural life, emphasizing natural materials, soft colors, and romantic details.",
        characteristics: &["Soft Pastels", "Vintage Furniture", "Natural Textures", "Romantic Details", "Rustic Elegance"],
        design_tips: &[
            "Layer vintage linens and lace for romantic texture",
            "Use distressed paint techniques on furniture for authentic aging",
            "Display fresh flowers in vintage pitchers and mason jars",
            "Incorporate toile patterns in fabrics and wallpaper",
            "Add wrought iron accents through lighting and hardware",
        ],
        color_palette: &["Soft Cream", "Lavender", "Sage Green", "Dusty Rose", "Warm White"],
        metals: &["Aged Brass", "Wrought Iron", "Antique Bronze", "Pewter"],
        wood_finishes: &["Distressed White", "Natural Oak", "Weathered Pine", "Antique Walnut"],
    },
    StyleDef {
        name: "Japandi",
        description: "You appreciate the harmony between Japanese minimalism and Scandinavian functionality, creating spaces that breathe with intentional simplicity. Every element serves a purpose while contributing to an overall sense of calm.",
        history: "A contemporary fusion of Japanese minimalism and Scandinavian hygge, emerging in the 2010s. It combines wabi-sabi, finding beauty in imperfection, with Scandinavian functionality and coziness.",
        characteristics: &["Natural Materials", "Clean Lines", "Neutral Palette", "Functional Design", "Zen Atmosphere"],
        design_tips: &[
            "Choose furniture with clean, simple lines and natural wood",
            "Keep surfaces clutter-free with hidden storage solutions",
            "Use natural textiles like linen and cotton in neutral tones",
            "Incorporate plants for a connection to nature",
            "Focus on quality over quantity in furniture selection",
        ],
        color_palette: &["Warm White", "Soft Beige", "Charcoal Gray", "Natural Linen", "Muted Green"],
        metals: &["Matte Black", "Brushed Steel", "Natural Copper", "Raw Iron"],
        wood_finishes: &["Light Ash", "Natural Birch", "Blonde Oak", "Untreated Pine"],
    },
    StyleDef {
        name: "Modern Farmhouse",
        description: "You love the marriage of rustic charm and contemporary comfort, honoring farmhouse heritage while embracing clean modern lines. Reclaimed materials and time-worn textures meet today's functionality.",
        history: "Popularized in the early 2000s, this style reimagines the traditional American farmhouse with contemporary elements. It blends rustic charm with modern conveniences, clean lines, and neutral colors.",
        characteristics: &["Rustic Charm", "Modern Comfort", "Natural Wood", "White & Neutral Tones", "Cozy Atmosphere"],
        design_tips: &[
            "Install shiplap walls for authentic farmhouse texture",
            "Use barn doors as room dividers or closet doors",
            "Create open shelving with reclaimed wood brackets",
            "Add farmhouse sinks with vintage-style faucets",
            "Layer cozy throws and pillows in natural fabrics",
        ],
        color_palette: &["Pure White", "Warm Gray", "Navy Blue", "Cream", "Soft Black"],
        metals: &["Matte Black", "Galvanized Steel", "Oil-Rubbed Bronze", "Brushed Nickel"],
        wood_finishes: &["Reclaimed Barn Wood", "White Wash", "Natural Cedar", "Rustic Pine"],
    },
    StyleDef {
        name: "Bohemian",
        description: "You embrace creativity and self-expression through eclectic design that celebrates cultural diversity and artistic freedom. Bold patterns meet rich textures, and every piece tells a story.",
        history: "Rooted in the 19th-century Bohemian movement of artists and writers, this style celebrates creativity and nonconformity. It mixes patterns, textures, and cultural influences freely.",
        characteristics: &["Bold Patterns", "Rich Textures", "Global Influences", "Layered Textiles", "Artistic Expression"],
        design_tips: &[
            "Layer multiple rugs with different patterns and textures",
            "Hang tapestries and macrame wall hangings",
            "Mix vintage and global furniture pieces",
            "Use floor cushions and poufs for flexible seating",
            "Create cozy corners with string lights and plants",
        ],
        color_palette: &["Deep Burgundy", "Burnt Orange", "Rich Teal", "Golden Yellow", "Warm Terracotta"],
        metals: &["Antique Brass", "Copper", "Bronze", "Gold Accents"],
        wood_finishes: &["Dark Walnut", "Mahogany", "Teak", "Reclaimed Exotic Woods"],
    },
    StyleDef {
        name: "Mid Century Modern",
        description: "You're inspired by the design movement of the 1950s and 60s, where form follows function in the most elegant way. Sleek lines and geometric shapes meet bold colors and natural materials.",
        history: "Developed from 1945-1965, this style emerged post-war as architects like Eames and Saarinen created furniture emphasizing clean lines, functionality, and integration with nature.",
        characteristics: &["Clean Lines", "Geometric Shapes", "Warm Woods", "Bold Colors", "Functional Beauty"],
        design_tips: &[
            "Choose furniture with tapered legs and geometric forms",
            "Add starburst mirrors and atomic-inspired lighting",
            "Use bold accent colors like orange, teal, and mustard",
            "Display vintage ceramics and sculptural objects",
            "Create conversation areas with low-profile seating",
        ],
        color_palette: &["Avocado Green", "Burnt Orange", "Mustard Yellow", "Chocolate Brown", "Cream"],
        metals: &["Brass", "Chrome", "Stainless Steel", "Copper"],
        wood_finishes: &["Walnut", "Teak", "Rosewood", "Cherry"],
    },
    StyleDef {
        name: "Traditional",
        description: "You value classic proportions, rich fabrics, and quality craftsmanship that never goes out of style. Your spaces feel refined and comfortable, anchored by symmetry and heirloom-worthy pieces.",
        history: "Drawing from 18th and 19th-century European design, this timeless style emphasizes classic proportions, rich fabrics, and quality craftsmanship. It reflects centuries of refined taste and elegant living.",
        characteristics: &["Classic Proportions", "Rich Fabrics", "Symmetry", "Ornate Details", "Warm Wood Tones"],
        design_tips: &[
            "Arrange furniture symmetrically around a focal point",
            "Choose upholstery in damask, velvet, or chintz",
            "Add crown molding and wainscoting for architectural detail",
            "Display framed art and antiques in balanced groupings",
            "Layer drapery with tiebacks and valances",
        ],
        color_palette: &["Deep Navy", "Burgundy", "Hunter Green", "Ivory", "Gold"],
        metals: &["Polished Brass", "Antique Gold", "Oil-Rubbed Bronze", "Silver"],
        wood_finishes: &["Cherry", "Mahogany", "Dark Walnut", "Rich Oak"],
    },
    StyleDef {
        name: "Modern Minimalist",
        description: "You believe less is more, favoring open space, clean surfaces, and a restrained palette. Every object earns its place, and light and form do the decorating.",
        history: "Influenced by the Bauhaus movement and Japanese aesthetics, this style gained popularity in the 1960s-70s. It focuses on essential elements, clean lines, and functional beauty in uncluttered spaces.",
        characteristics: &["Open Space", "Clean Surfaces", "Monochrome Palette", "Hidden Storage", "Architectural Lighting"],
        design_tips: &[
            "Limit each room to a few statement pieces",
            "Choose handleless cabinetry and flush storage",
            "Let natural light take the place of decor",
            "Stick to a palette of two or three tones",
            "Pick furniture with slim profiles and raised legs",
        ],
        color_palette: &["Pure White", "Concrete Gray", "Black", "Stone", "Soft Taupe"],
        metals: &["Matte Black", "Brushed Stainless", "Polished Chrome", "Satin Nickel"],
        wood_finishes: &["Pale Maple", "White Oak", "Ebonized Ash", "Natural Beech"],
    },
    StyleDef {
        name: "Transitional",
        description: "You bridge traditional comfort and contemporary sophistication, honoring the past while embracing the present. Neutral palettes and balanced proportions create a backdrop that evolves with you.",
        history: "Emerging in the 1990s, this style bridges traditional and contemporary design. It combines the comfort of classic elements with the clean lines of modern design.",
        characteristics: &["Classic Comfort", "Modern Sophistication", "Neutral Palette", "Balanced Design", "Timeless Appeal"],
        design_tips: &[
            "Mix traditional and contemporary furniture pieces",
            "Use neutral colors as a base with subtle pattern accents",
            "Combine textures like linen, leather, and wood",
            "Add both classic and modern lighting fixtures",
            "Layer accessories in varying heights and materials",
        ],
        color_palette: &["Warm Gray", "Soft White", "Taupe", "Sage Green", "Cream"],
        metals: &["Brushed Nickel", "Satin Brass", "Oil-Rubbed Bronze", "Polished Chrome"],
        wood_finishes: &["Medium Oak", "Honey Maple", "Warm Cherry", "Natural Ash"],
    },
];

const QUESTIONS: [QuestionDef; 11] = [
    QuestionDef { prompt: "Which kitchen style can you envision yourself in?", room: "Kitchen", image_hint: None },
    QuestionDef { prompt: "Which living room style speaks to you?", room: "Living Room", image_hint: None },
    QuestionDef { prompt: "Which dining room style can you see yourself enjoying meals in?", room: "Dining Room", image_hint: None },
    QuestionDef { prompt: "Which primary bedroom style would make you feel most at home?", room: "Primary Bedroom", image_hint: None },
    QuestionDef { prompt: "Which primary bathroom style appeals to you most?", room: "Primary Bathroom", image_hint: None },
    QuestionDef { prompt: "Which wood finish appeals to you?", room: "Home Office", image_hint: None },
    QuestionDef { prompt: "Which entryway style would welcome you home?", room: "Entryway", image_hint: None },
    QuestionDef { prompt: "Which outdoor patio style would be your perfect retreat?", room: "Outdoor Patio", image_hint: None },
    QuestionDef { prompt: "Which color palette do you prefer?", room: "Lifestyle", image_hint: Some("Color Palette") },
    QuestionDef { prompt: "Which chair would you like to relax in?", room: "Lifestyle", image_hint: Some("Chair") },
    QuestionDef { prompt: "Which door knob would you open to your home?", room: "Lifestyle", image_hint: Some("Door Knob") },
];

/// Declared style universe, in canonical order.
pub fn universe() -> StyleUniverse {
    StyleUniverse::new(STYLES.iter().map(|s| s.name))
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn styles() -> Vec<Style> {
    STYLES
        .iter()
        .enumerate()
        .map(|(i, def)| Style {
            id: slugify(def.name),
            name: def.name.to_string(),
            slug: slugify(def.name),
            description: def.description.to_string(),
            history: Some(def.history.to_string()),
            characteristics: to_strings(def.characteristics),
            design_tips: to_strings(def.design_tips),
            color_palette: to_strings(def.color_palette),
            hero_image: None,
            video: None,
            pdf_guide: None,
            sort_order: i as i64,
        })
        .collect()
}

/// Questions in declared order, options A..H in style order.
pub fn questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .enumerate()
        .map(|(qi, def)| {
            let room = RoomType::from_tag(def.room);
            let options = STYLES
                .iter()
                .enumerate()
                .filter_map(|(si, style)| {
                    let letter = Letter::from_index(si)?;
                    let key = match def.image_hint {
                        Some(hint) => format!("{} {}", style.name, hint),
                        None => style.name.to_string(),
                    };
                    Some(QuizOption {
                        letter,
                        style: Some(style.name.to_string()),
                        room: room.clone(),
                        image: MediaRef::Logical {
                            category: MediaCategory::Room(room.clone()),
                            key,
                        },
                        text: None,
                        sort_order: si as i64,
                    })
                })
                .collect();

            Question {
                id: (qi + 1).to_string(),
                prompt: def.prompt.to_string(),
                room,
                options,
                sort_order: qi as i64,
            }
        })
        .collect()
}

fn material_list(style_id: &str, kind: MaterialType, names: &[&str]) -> Vec<Material> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Material {
            id: format!("{}-{}-{}", style_id, kind.as_str(), i + 1),
            style_id: style_id.to_string(),
            material_type: kind,
            name: name.to_string(),
            image: None,
            description: None,
            sort_order: i as i64,
        })
        .collect()
}

/// Wood and metal finishes for a style id (its slug). Unknown ids yield nothing.
pub fn materials(style_id: &str) -> StyleMaterials {
    match STYLES.iter().find(|s| slugify(s.name) == style_id) {
        Some(def) => StyleMaterials {
            wood: material_list(style_id, MaterialType::Wood, def.wood_finishes),
            metal: material_list(style_id, MaterialType::Metal, def.metals),
        },
        None => StyleMaterials::default(),
    }
}

/// Content source backed by the compiled-in table.
#[derive(Debug, Clone, Default)]
pub struct StaticContent;

impl StaticContent {
    pub fn new() -> Self {
        Self
    }
}

impl ContentSource for StaticContent {
    async fn list_questions(&self) -> Loaded<Vec<Question>> {
        Loaded::ok(questions())
    }

    async fn list_styles(&self) -> Loaded<Vec<Style>> {
        Loaded::ok(styles())
    }

    async fn materials_for_style(&self, style_id: &str) -> Loaded<StyleMaterials> {
        Loaded::ok(materials(style_id))
    }

    async fn style_by_slug(&self, slug: &str) -> Loaded<Option<Style>> {
        Loaded::ok(styles().into_iter().find(|s| s.slug == slug))
    }
}
