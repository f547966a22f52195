mod static_page;

pub(crate) use static_page::{write_page, write_text};
