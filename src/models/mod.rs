
pub mod user;
pub mod issue;
pub mod estimation;

pub use user::*;
pub use issue::*;
pub use estimation::*;
