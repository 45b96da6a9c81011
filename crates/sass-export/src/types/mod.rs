pub mod declaration;
pub mod section;

pub use declaration::{Declaration, ExtendField};
pub use section::{Section, Sections};
