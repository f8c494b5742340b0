pub mod use_auto_refresh;
pub mod use_page_title;

pub use use_auto_refresh::use_auto_refresh;
pub use use_page_title::use_page_title;
