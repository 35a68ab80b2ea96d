//! End-to-end behavior tests over a full marketing page.
//!
//! Builds a page the way a host would - nav with a dropdown, logo, cards,
//! section titles, a contact form, fragment sections - then initializes
//! and drives it through events and virtual time.

use spark_page::behaviors::form::{
    SENDING_LABEL, SUBMIT_DELAY_MS, SUCCESS_HIDE_DELAY_MS, SUCCESS_MESSAGE_TEXT,
};
use spark_page::dom::{
    add_class, append_child, create_element, has_class, is_disabled, set_attribute,
    set_fragment_id, set_rect, set_required, set_text, text_of, value_of,
};
use spark_page::events::{dispatch_blur, dispatch_click, dispatch_submit};
use spark_page::timers::advance;
use spark_page::viewport::{last_scroll, scroll_to, set_viewport_height};
use spark_page::{
    HOME_PAGE, MENU_CLOSED_GLYPH, MENU_OPEN_GLYPH, MenuState, Rect, ScrollBehavior, class,
    init_page, menu_state, pending_navigation, reset_page_state, scroll_y, set_pathname,
};

/// Handles to the interesting elements of the built page.
struct Page {
    toggle: usize,
    menu: usize,
    home_link: usize,
    about_link: usize,
    services_link: usize,
    home2_link: usize,
    contact_link: usize,
    logo: usize,
    hero_card: usize,
    below_card: usize,
    form: usize,
    name_input: usize,
    name_error: usize,
    email_input: usize,
    email_error: usize,
    phone_input: usize,
    submit: usize,
    success: usize,
    outside: usize,
}

fn nav_link(menu: usize, href: &str) -> usize {
    let link = create_element("a");
    set_attribute(link, "href", href);
    append_child(menu, link).unwrap();
    link
}

fn form_field(form: usize, name: &str, required: bool) -> (usize, usize) {
    let group = create_element("div");
    let input = create_element("input");
    add_class(input, class::FORM_CONTROL);
    set_attribute(input, "name", name);
    set_required(input, required);
    let error = create_element("span");
    add_class(error, class::ERROR_MESSAGE);
    append_child(form, group).unwrap();
    append_child(group, input).unwrap();
    append_child(group, error).unwrap();
    (input, error)
}

fn build_page() -> Page {
    let body = create_element("body");
    set_viewport_height(800.0);

    let logo = create_element("div");
    add_class(logo, class::LOGO);
    append_child(body, logo).unwrap();

    let toggle = create_element("button");
    add_class(toggle, class::MENU_TOGGLE);
    append_child(body, toggle).unwrap();

    let menu = create_element("nav");
    add_class(menu, class::NAV_MENU);
    append_child(body, menu).unwrap();

    let home_link = nav_link(menu, "index.html");
    let about_link = nav_link(menu, "about.html");

    let dropdown = create_element("li");
    add_class(dropdown, class::DROPDOWN);
    append_child(menu, dropdown).unwrap();
    let services_link = nav_link(dropdown, "services.html");
    let home2_link = nav_link(dropdown, "home2.html");

    let contact_link = nav_link(menu, "#contact");

    let hero_card = create_element("div");
    add_class(hero_card, class::CARD);
    set_rect(hero_card, Rect::new(0.0, 200.0, 600.0, 300.0));
    append_child(body, hero_card).unwrap();

    let below_card = create_element("div");
    add_class(below_card, class::CARD);
    set_rect(below_card, Rect::new(0.0, 2400.0, 600.0, 300.0));
    append_child(body, below_card).unwrap();

    let title = create_element("h2");
    add_class(title, class::SECTION_TITLE);
    set_rect(title, Rect::new(0.0, 3000.0, 600.0, 60.0));
    append_child(body, title).unwrap();

    let contact_section = create_element("section");
    set_fragment_id(contact_section, "contact");
    set_rect(contact_section, Rect::new(0.0, 3200.0, 600.0, 700.0));
    append_child(body, contact_section).unwrap();

    let form = create_element("form");
    append_child(contact_section, form).unwrap();
    let (name_input, name_error) = form_field(form, "name", true);
    let (email_input, email_error) = form_field(form, "email", true);
    let (phone_input, _) = form_field(form, "phone", false);

    let submit = create_element("button");
    set_attribute(submit, "type", "submit");
    set_text(submit, "Send Message");
    append_child(form, submit).unwrap();

    let success = create_element("div");
    add_class(success, class::SUCCESS_MESSAGE);
    append_child(form, success).unwrap();

    let outside = create_element("footer");
    append_child(body, outside).unwrap();

    Page {
        toggle,
        menu,
        home_link,
        about_link,
        services_link,
        home2_link,
        contact_link,
        logo,
        hero_card,
        below_card,
        form,
        name_input,
        name_error,
        email_input,
        email_error,
        phone_input,
        submit,
        success,
        outside,
    }
}

fn setup(pathname: &str) -> Page {
    reset_page_state();
    set_pathname(pathname);
    let page = build_page();
    init_page();
    page
}

#[test]
fn menu_toggle_glyph_stays_in_sync() {
    let page = setup("/index.html");

    assert_eq!(menu_state(), MenuState::Closed);
    assert_eq!(text_of(page.toggle), MENU_CLOSED_GLYPH);

    dispatch_click(page.toggle);
    assert_eq!(menu_state(), MenuState::Open);
    assert!(has_class(page.menu, class::ACTIVE));
    assert_eq!(text_of(page.toggle), MENU_OPEN_GLYPH);

    dispatch_click(page.outside);
    assert_eq!(menu_state(), MenuState::Closed);
    assert!(!has_class(page.menu, class::ACTIVE));
    assert_eq!(text_of(page.toggle), MENU_CLOSED_GLYPH);
}

#[test]
fn nav_link_click_closes_menu() {
    let page = setup("/index.html");

    dispatch_click(page.toggle);
    assert_eq!(menu_state(), MenuState::Open);

    dispatch_click(page.about_link);
    assert_eq!(menu_state(), MenuState::Closed);
}

#[test]
fn active_link_marks_current_page() {
    let page = setup("/about.html");
    assert!(has_class(page.about_link, class::ACTIVE));
    assert!(!has_class(page.home_link, class::ACTIVE));
    assert!(!has_class(page.services_link, class::ACTIVE));
}

#[test]
fn active_link_defaults_to_home_for_empty_path() {
    let page = setup("/");
    assert!(has_class(page.home_link, class::ACTIVE));
    assert!(!has_class(page.about_link, class::ACTIVE));
}

#[test]
fn dropdown_child_lights_parent_except_secondary_home() {
    let page = setup("/home2.html");
    assert!(has_class(page.home2_link, class::ACTIVE));
    assert!(!has_class(page.services_link, class::ACTIVE));
}

#[test]
fn visible_card_reveals_at_init_and_only_once() {
    let page = setup("/index.html");

    // Hero card is in the initial viewport; the init pass reveals it.
    assert!(has_class(page.hero_card, class::FADE_IN));
    assert!(!has_class(page.below_card, class::FADE_IN));

    scroll_to(2000.0, ScrollBehavior::Auto);
    assert!(has_class(page.below_card, class::FADE_IN));

    // Scrolling away never un-reveals.
    scroll_to(0.0, ScrollBehavior::Auto);
    assert!(has_class(page.hero_card, class::FADE_IN));
    assert!(has_class(page.below_card, class::FADE_IN));
}

#[test]
fn fragment_link_scrolls_to_section() {
    let page = setup("/index.html");

    let consumed = dispatch_click(page.contact_link);
    assert!(consumed);
    assert_eq!(scroll_y(), 3200.0);
    assert_eq!(last_scroll().unwrap().behavior, ScrollBehavior::Smooth);
    // The click on a menu link also closed the menu if it was open; the
    // menu was closed already, so state is unchanged.
    assert_eq!(menu_state(), MenuState::Closed);
}

#[test]
fn dangling_fragment_link_is_left_to_default() {
    let page = setup("/index.html");
    let dangling = create_element("a");
    set_attribute(dangling, "href", "#missing");
    append_child(page.outside, dangling).unwrap();
    // Wired before init only; a link added later gets no handler, and the
    // dispatch reports the default as not suppressed either way.
    assert!(!dispatch_click(dangling));
    assert_eq!(last_scroll(), None);
}

#[test]
fn blur_validation_round_trip() {
    let page = setup("/index.html");

    dispatch_blur(page.email_input);
    assert!(has_class(page.email_error, class::SHOW));

    spark_page::set_value(page.email_input, "ada@example.com");
    dispatch_blur(page.email_input);
    assert!(!has_class(page.email_error, class::SHOW));
}

#[test]
fn submission_lifecycle_disables_once_and_restores_label() {
    let page = setup("/index.html");

    spark_page::set_value(page.name_input, "Ada Lovelace");
    spark_page::set_value(page.email_input, "ada@example.com");
    spark_page::set_value(page.phone_input, "+1-555-123-4567");

    assert!(dispatch_submit(page.form));
    assert!(is_disabled(page.submit));
    assert_eq!(text_of(page.submit), SENDING_LABEL);

    advance(SUBMIT_DELAY_MS);
    assert!(!is_disabled(page.submit));
    assert_eq!(text_of(page.submit), "Send Message");
    assert!(has_class(page.success, class::SHOW));
    assert_eq!(text_of(page.success), SUCCESS_MESSAGE_TEXT);
    assert_eq!(value_of(page.name_input), "");

    advance(SUCCESS_HIDE_DELAY_MS);
    assert!(!has_class(page.success, class::SHOW));
}

#[test]
fn invalid_submission_shows_errors_and_stays_idle() {
    let page = setup("/index.html");

    spark_page::set_value(page.email_input, "nope");
    assert!(dispatch_submit(page.form));

    assert!(!is_disabled(page.submit));
    assert!(has_class(page.name_error, class::SHOW)); // required, empty
    assert!(has_class(page.email_error, class::SHOW)); // malformed

    // User fixes both and retries.
    spark_page::set_value(page.name_input, "Ada");
    spark_page::set_value(page.email_input, "ada@example.com");
    dispatch_submit(page.form);
    assert!(is_disabled(page.submit));
    assert!(!has_class(page.email_error, class::SHOW));
}

#[test]
fn logo_click_requests_home_navigation() {
    let page = setup("/about.html");
    assert_eq!(pending_navigation(), None);
    dispatch_click(page.logo);
    assert_eq!(pending_navigation().as_deref(), Some(HOME_PAGE));
}
