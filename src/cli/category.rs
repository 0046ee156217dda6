//! Category CLI command

use crate::display::format_category_list;
use crate::models::CategoryCatalog;

/// Handle `categories`: print the configured categories per kind
pub fn handle_categories_command(catalog: &CategoryCatalog) {
    print!("{}", format_category_list(catalog));
}
