use std::rc::Rc;

use fltk::{
    app::Sender,
    button::{Button, CheckButton},
    enums::{Align, Font},
    frame::Frame,
    group::{Flex, FlexType, Group},
    menu::Choice,
    misc::HelpView,
    prelude::*,
};
use syntect::parsing::SyntaxSet;

use super::editor_host::EditorHost;
use super::main_window::PageArea;
use super::menu::{MARKDOWN_DOCS_URL, REPOSITORY_URL, SYNTAX_DOCS_URL};
use super::select::{labeled_choice, select_option};
use crate::app::domain::{ColorScheme, EditorHeight, LanguageRegistry, Message, Page, ThemeCatalogue};

const ROW_HEIGHT: i32 = 30;

pub struct DemoWidgets {
    pub group: Group,
    pub host: EditorHost,
    pub lang: Choice,
    pub scheme: Choice,
    pub height: Choice,
    pub auto_focus: CheckButton,
    pub readme: HelpView,
    /// Entries of `lang`, in menu order.
    pub language_names: Vec<&'static str>,
}

impl DemoWidgets {
    /// Reflect the session's selections in the drop-downs.
    pub fn show_selection(&mut self, language: &str, scheme: ColorScheme, height: EditorHeight) {
        select_option(&mut self.lang, &self.language_names, language);
        let schemes: Vec<&str> = ColorScheme::ALL.iter().map(|s| s.as_str()).collect();
        select_option(&mut self.scheme, &schemes, scheme.as_str());
        select_option(&mut self.height, &EditorHeight::OPTIONS, &height.to_string());
    }

    pub fn set_readme_html(&mut self, html: &str) {
        self.readme.set_value(html);
    }
}

pub fn build_demo_page(
    area: PageArea,
    sender: &Sender<Message>,
    syntax_set: Rc<SyntaxSet>,
    catalogue: Rc<ThemeCatalogue>,
    registry: &LanguageRegistry,
    font_size: i32,
) -> DemoWidgets {
    let mut group = Group::new(area.x, area.y, area.w, area.h, Page::Demo.label());

    let mut col = Flex::new(area.x, area.y, area.w, area.h, None);
    col.set_type(FlexType::Column);
    col.set_margin(10);
    col.set_pad(8);

    // Header
    let mut header = Flex::default();
    header.set_type(FlexType::Row);
    let mut title = Frame::default()
        .with_label("Editor Showcase")
        .with_align(Align::Left | Align::Inside);
    title.set_label_font(Font::HelveticaBold);
    title.set_label_size(22);
    let version = Frame::default()
        .with_label(&format!("v{}", env!("CARGO_PKG_VERSION")))
        .with_align(Align::Left | Align::Inside);
    header.fixed(&version, 80);
    header.end();
    col.fixed(&header, 40);

    let tagline = Frame::default()
        .with_label("A syntax-highlighting code editor widget with switchable languages, themes and heights.")
        .with_align(Align::Left | Align::Inside);
    col.fixed(&tagline, 20);

    // Links
    let mut links = Flex::default();
    links.set_type(FlexType::Row);
    for (label, url) in [
        ("Repository", REPOSITORY_URL),
        ("syntect", SYNTAX_DOCS_URL),
        ("pulldown-cmark", MARKDOWN_DOCS_URL),
    ] {
        let mut btn = Button::default().with_label(label);
        btn.set_callback({ let s = *sender; move |_| s.send(Message::OpenLink(url)) });
        links.fixed(&btn, 130);
    }
    Frame::default();
    links.end();
    col.fixed(&links, ROW_HEIGHT);

    let host = EditorHost::new(&col, Page::Demo, *sender, syntax_set, catalogue, font_size);

    // Controls
    let mut controls = Flex::default();
    controls.set_type(FlexType::Row);
    controls.set_pad(6);

    let language_names: Vec<&'static str> = registry.names().collect();
    let mut lang = labeled_choice(&mut controls, "Lang", &language_names, None);
    lang.set_callback({
        let s = *sender;
        let names = language_names.clone();
        move |c| {
            if let Some(name) = usize::try_from(c.value()).ok().and_then(|i| names.get(i)) {
                s.send(Message::SelectLanguage(name.to_string()));
            }
        }
    });
    controls.fixed(&lang, 130);

    let scheme_names: Vec<&str> = ColorScheme::ALL.iter().map(|s| s.as_str()).collect();
    let mut scheme = labeled_choice(&mut controls, "Theme", &scheme_names, None);
    scheme.set_callback({
        let s = *sender;
        move |c| {
            if let Some(scheme) = usize::try_from(c.value()).ok().and_then(|i| ColorScheme::ALL.get(i)) {
                s.send(Message::SelectScheme(*scheme));
            }
        }
    });
    controls.fixed(&scheme, 90);

    let mut height = labeled_choice(&mut controls, "Height", &EditorHeight::OPTIONS, None);
    height.set_callback({
        let s = *sender;
        move |c| {
            let option = usize::try_from(c.value()).ok().and_then(|i| EditorHeight::OPTIONS.get(i));
            if let Some(Ok(height)) = option.map(|o| o.parse::<EditorHeight>()) {
                s.send(Message::SelectHeight(height));
            }
        }
    });
    controls.fixed(&height, 90);

    let mut change = Button::default().with_label("change code");
    change.set_callback({ let s = *sender; move |_| s.send(Message::MutateContent) });
    controls.fixed(&change, 110);

    let mut auto_focus = CheckButton::default().with_label("autoFocus");
    auto_focus.set_callback({ let s = *sender; move |b| s.send(Message::SetAutoFocus(b.is_checked())) });
    controls.fixed(&auto_focus, 100);

    Frame::default();
    controls.end();
    col.fixed(&controls, ROW_HEIGHT);

    let mut readme = HelpView::default();
    readme.set_text_size(14);

    col.end();
    group.end();
    group.resizable(&col);

    DemoWidgets {
        group,
        host,
        lang,
        scheme,
        height,
        auto_focus,
        readme,
        language_names,
    }
}
