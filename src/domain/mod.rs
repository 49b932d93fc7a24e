pub mod material;
pub mod media;
pub mod question;
pub mod style;

pub use material::{Material, MaterialType, StyleMaterials};
pub use media::{FileType, MediaCategory, MediaFile, MediaRef, RoomType};
pub use question::{Letter, Question, QuizOption, LETTERS};
pub use style::{slugify, Style, StyleUniverse};
