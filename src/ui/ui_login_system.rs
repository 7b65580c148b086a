//! The login form: email and password fields, show-password toggle with
//! the pointer-tracking eye glyph, remember checkbox, and submit button.
//! Publishes focus, content, validity, and hover signals for the
//! creature systems.

use bevy::math::Vec2;
use bevy::prelude::{EventWriter, Local, ResMut};
use bevy_egui::{egui, EguiContexts};
use lazy_static::lazy_static;
use regex::Regex;

use crate::events::{FieldFocusEvent, LoginEvent, TrackedField};
use crate::resources::{LoginFormState, PupilIndicatorState};
use crate::signals::{FocusState, ACCEPTABLE_PASSWORD_LEN};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
}

const FORM_WIDTH: f32 = 340.0;
const ICON_SIZE: f32 = 30.0;

/// Outline radii of the eye glyph. The containment ellipse the pupil
/// rides in is the smaller interior recorded in `PupilIndicatorState`.
const GLYPH_RX: f32 = 13.0;
const GLYPH_RY: f32 = 8.0;

#[derive(Default)]
pub struct UiStateLogin {
    initial_focus_set: bool,
    /// The password field has lost focus at least once; validity styling
    /// only applies after that.
    password_blurred: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn ui_login_system(
    mut ui_state: Local<UiStateLogin>,
    mut egui_context: EguiContexts,
    mut form_state: ResMut<LoginFormState>,
    mut indicator: ResMut<PupilIndicatorState>,
    mut focus_events: EventWriter<FieldFocusEvent>,
    mut login_events: EventWriter<LoginEvent>,
) {
    let ui_state = &mut *ui_state;
    let form_state = &mut *form_state;

    let screen_size = egui_context
        .ctx_mut()
        .input(|input| input.screen_rect().size());
    // The creatures own the left 65% of the window; the form sits
    // centered in the remaining panel.
    let panel_left = screen_size.x * 0.65;
    let position = egui::pos2(
        panel_left + (screen_size.x - panel_left - FORM_WIDTH).max(0.0) / 2.0,
        (screen_size.y * 0.5 - 280.0).max(20.0),
    );

    let mut response_email = None;
    let mut response_password = None;
    let mut response_submit = None;
    let mut toggle_clicked = false;
    let mut enter_pressed = false;

    egui::Window::new("Login")
        .frame(egui::Frame::none())
        .title_bar(false)
        .resizable(false)
        .fixed_pos(position)
        .default_width(FORM_WIDTH)
        .show(egui_context.ctx_mut(), |ui| {
            ui.set_width(FORM_WIDTH);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("Welcome back!").strong().size(28.0));
                ui.label(egui::RichText::new("Please enter your details").strong());
            });
            ui.add_space(24.0);

            ui.label(egui::RichText::new("Email").strong());
            let email = ui.add(
                egui::TextEdit::singleline(&mut form_state.email)
                    .desired_width(FORM_WIDTH)
                    .hint_text("you@example.com"),
            );
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Password").strong());
            let password = ui
                .horizontal(|ui| {
                    let field = ui.add(
                        egui::TextEdit::singleline(&mut form_state.password)
                            .desired_width(FORM_WIDTH - ICON_SIZE - 8.0)
                            .password(!form_state.show_password),
                    );
                    toggle_clicked = eye_toggle(ui, form_state.show_password, &mut indicator);
                    field
                })
                .inner;
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.checkbox(&mut form_state.remember, "Remember for 30 days");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new("Forgot password?").weak());
                });
            });
            ui.add_space(16.0);

            let submit = ui.add_sized(
                egui::vec2(FORM_WIDTH, 36.0),
                egui::Button::new(egui::RichText::new("Log in").strong()),
            );
            ui.add_space(8.0);
            ui.add_sized(
                egui::vec2(FORM_WIDTH, 36.0),
                egui::Button::new("Log in with Google"),
            );
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Don't have an account? Sign up").weak());
            });

            enter_pressed = ui.input(|input| input.key_pressed(egui::Key::Enter));

            response_email = Some(email);
            response_password = Some(password);
            response_submit = Some(submit);
        });

    let Some(response_email) = response_email else {
        return;
    };
    let Some(response_password) = response_password else {
        return;
    };

    if !ui_state.initial_focus_set {
        response_email.request_focus();
        ui_state.initial_focus_set = true;
    }

    if toggle_clicked {
        form_state.show_password = !form_state.show_password;
    }

    // Focus transitions, losses before gains so a same-frame hop between
    // fields ends on the gaining one.
    if response_email.lost_focus() {
        focus_events.write(FieldFocusEvent::Lost(TrackedField::Email));
    }
    if response_password.lost_focus() {
        focus_events.write(FieldFocusEvent::Lost(TrackedField::Password));
        ui_state.password_blurred = true;
    }
    if response_email.gained_focus() {
        form_state.touched = true;
        focus_events.write(FieldFocusEvent::Gained(TrackedField::Email));
    }
    if response_password.gained_focus() {
        form_state.touched = true;
        focus_events.write(FieldFocusEvent::Gained(TrackedField::Password));
    }

    form_state.focus = if response_email.has_focus() {
        FocusState::Email
    } else if response_password.has_focus() {
        FocusState::Password
    } else {
        FocusState::None
    };

    form_state.password_invalid = ui_state.password_blurred
        && !form_state.password.is_empty()
        && form_state.password.chars().count() < ACCEPTABLE_PASSWORD_LEN;

    form_state.submit_hovered = response_submit
        .as_ref()
        .map_or(false, |response| response.hovered());

    let submit_clicked = response_submit.map_or(false, |response| response.clicked());
    let field_focused = form_state.focus != FocusState::None;
    if submit_clicked || (enter_pressed && field_focused) {
        if form_state.email.is_empty() || !EMAIL_REGEX.is_match(&form_state.email) {
            response_email.request_focus();
        } else if form_state.password.is_empty() {
            response_password.request_focus();
        } else {
            login_events.write(LoginEvent::Login {
                username: form_state.email.clone(),
                password: form_state.password.clone(),
            });
        }
    }
}

/// Paints the show/hide toggle: an open eye whose pupil chases the
/// pointer, or a closed lid when the password is revealed. Returns true
/// on click. Writes the glyph center back so the pupil system has a
/// target to aim at.
fn eye_toggle(
    ui: &mut egui::Ui,
    show_password: bool,
    indicator: &mut PupilIndicatorState,
) -> bool {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE), egui::Sense::click());
    let painter = ui.painter().with_clip_rect(rect.expand(2.0));
    let center = rect.center();
    let color = ui.visuals().text_color();
    let stroke = egui::Stroke::new(1.8, color);

    if show_password {
        // Closed lid: the lower half of the outline.
        let points: Vec<egui::Pos2> = (0..=24)
            .map(|i| {
                let t = i as f32 / 24.0 * std::f32::consts::PI;
                egui::pos2(center.x - GLYPH_RX * t.cos(), center.y + GLYPH_RY * t.sin())
            })
            .collect();
        painter.add(egui::epaint::PathShape::line(points, stroke));
        indicator.visible = false;
    } else {
        let points: Vec<egui::Pos2> = (0..48)
            .map(|i| {
                let t = i as f32 / 48.0 * std::f32::consts::TAU;
                egui::pos2(center.x + GLYPH_RX * t.cos(), center.y + GLYPH_RY * t.sin())
            })
            .collect();
        painter.add(egui::epaint::PathShape::closed_line(points, stroke));
        painter.circle_filled(
            center + egui::vec2(indicator.offset.x, indicator.offset.y),
            indicator.display_radius,
            color,
        );
        indicator.center = Vec2::new(center.x, center.y);
        indicator.visible = true;
    }

    response.clicked()
}
