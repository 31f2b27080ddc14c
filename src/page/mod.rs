pub mod cart_page;
pub mod headless;
pub mod markup;
pub mod port;

pub use cart_page::*;
pub use headless::HeadlessPage;
pub use port::*;
