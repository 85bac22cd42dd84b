pub mod chat;
pub mod diy;
pub mod site;
pub mod story;

pub use self::chat::{ChatMessage, NewMessage};
pub use self::diy::DiyProject;
pub use self::site::{SiteData, SitePatch};
pub use self::story::Story;
