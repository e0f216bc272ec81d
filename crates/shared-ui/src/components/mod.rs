pub mod badge;
pub mod card;
pub mod page_header;
pub mod skeleton;

pub use badge::*;
pub use card::*;
pub use page_header::*;
pub use skeleton::*;
