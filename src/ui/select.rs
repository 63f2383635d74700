use fltk::{
    enums::Align,
    frame::Frame,
    group::Flex,
    menu::Choice,
    prelude::*,
};

/// Add a caption and a drop-down to `row`. `selected` is an index into `options`.
pub fn labeled_choice(row: &mut Flex, caption: &str, options: &[&str], selected: Option<usize>) -> Choice {
    let caption_frame = Frame::default()
        .with_label(caption)
        .with_align(Align::Right | Align::Inside);
    row.fixed(&caption_frame, 8 * caption.len() as i32 + 12);

    let mut choice = Choice::default();
    for option in options {
        choice.add_choice(&escape_menu_label(option));
    }
    if let Some(idx) = selected.filter(|&i| i < options.len()) {
        choice.set_value(idx as i32);
    }
    choice
}

/// Show the entry matching `option`, if any.
pub fn select_option(choice: &mut Choice, options: &[&str], option: &str) {
    if let Some(idx) = options.iter().position(|o| *o == option) {
        choice.set_value(idx as i32);
    }
}

/// Menu labels treat `/` as a submenu separator and `&` and `_` as markup.
fn escape_menu_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '/' | '_' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '&' => escaped.push_str("&&"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_menu_label() {
        assert_eq!(escape_menu_label("base16-ocean.dark"), "base16-ocean.dark");
        assert_eq!(escape_menu_label("a/b"), "a\\/b");
        assert_eq!(escape_menu_label("R&D"), "R&&D");
        assert_eq!(escape_menu_label("Solarized (dark)"), "Solarized (dark)");
    }
}
