use crate::page::Page;


pub fn toggle_dropdown(page: &mut Page) {
    page.dropdown_open = !page.dropdown_open;
}

// Clicks on the menu button itself never reach here.
pub fn on_document_click(page: &mut Page, inside_dropdown: bool) {
    if !inside_dropdown {
        page.dropdown_open = false;
    }
}

pub fn toggle_faq(page: &mut Page, index: usize) {
    match page.faq.get_mut(index) {
        Some(item) => item.expanded = !item.expanded,
        None => warn!("No FAQ item at {}", index),
    }
}
