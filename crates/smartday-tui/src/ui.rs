//! Rendering.
//!
//! Pure draw functions over the [`App`] state. Clickable regions are
//! recorded into `app.areas` on every frame so mouse hit tests always match
//! what is on screen.

use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use strum::IntoEnumIterator;

use smartday_application::status::StatusKind;
use smartday_core::chat::Sender;
use smartday_core::map::MapDataset;
use smartday_core::preference::PreferenceCategory;
use smartday_core::view::ActiveView;

use crate::app::{App, HitAreas, LoginField, LoginMode, Screen};

const ACTIVE_COLOR: Color = Color::LightCyan;
const USER_COLOR: Color = Color::Green;
const BOT_COLOR: Color = Color::LightBlue;
const MARKER_COLOR: Color = Color::Red;
const ERROR_COLOR: Color = Color::LightRed;
const INFO_COLOR: Color = Color::LightGreen;
const DIM_COLOR: Color = Color::DarkGray;

const SIDEBAR_EXPANDED_WIDTH: u16 = 32;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 6;

pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());
    let body = layout[0];
    let footer = layout[1];

    app.areas = HitAreas::default();
    match app.screen {
        Screen::Login => draw_login(frame, app, body),
        Screen::Chat => draw_chat(frame, app, body),
    }
    draw_footer(frame, app, footer);

    if let Some(notice) = app.notice.clone() {
        draw_notice(frame, body, &notice);
    }
}

// ---------------------------------------------------------------------------
// Login screen
// ---------------------------------------------------------------------------

fn draw_login(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let form_area = centered_rect(area, 48, 13);
    let title = match app.login.mode {
        LoginMode::SignIn => " SmartDay / Sign In ",
        LoginMode::SignUp => " SmartDay / Sign Up ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(form_area);
    frame.render_widget(Clear, form_area);
    frame.render_widget(block, form_area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(mode_tabs(app.login.mode));
    lines.push(Line::default());
    lines.push(field_line(
        "Email",
        &app.login.email,
        app.login.focus == LoginField::Email,
        false,
    ));
    lines.push(field_line(
        "Password",
        &app.login.password,
        app.login.focus == LoginField::Password,
        true,
    ));
    if app.login.mode == LoginMode::SignUp {
        lines.push(field_line(
            "Username",
            &app.login.username,
            app.login.focus == LoginField::Username,
            false,
        ));
    }
    lines.push(Line::default());
    if app.login.busy {
        lines.push(Line::styled("Contacting the server...", DIM_COLOR));
    } else if let Some(message) = &app.login.message {
        let color = match message.kind {
            StatusKind::Info => INFO_COLOR,
            StatusKind::Error => ERROR_COLOR,
        };
        lines.push(Line::styled(message.text.clone(), color));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn mode_tabs(mode: LoginMode) -> Line<'static> {
    let (sign_in, sign_up) = match mode {
        LoginMode::SignIn => (
            Span::styled("[ Sign In ]", Style::new().fg(ACTIVE_COLOR).bold()),
            Span::styled("  Sign Up  ", Style::new().fg(DIM_COLOR)),
        ),
        LoginMode::SignUp => (
            Span::styled("  Sign In  ", Style::new().fg(DIM_COLOR)),
            Span::styled("[ Sign Up ]", Style::new().fg(ACTIVE_COLOR).bold()),
        ),
    };
    Line::from(vec![
        sign_in,
        Span::raw("  "),
        sign_up,
        Span::styled("   (Ctrl+T)", Style::new().fg(DIM_COLOR)),
    ])
}

fn field_line(label: &str, value: &str, focused: bool, masked: bool) -> Line<'static> {
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::new().fg(ACTIVE_COLOR)
    } else {
        Style::new()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label:<9}"), style),
        Span::raw(shown),
        Span::raw(if focused { "█" } else { "" }),
    ])
}

// ---------------------------------------------------------------------------
// Chat screen
// ---------------------------------------------------------------------------

fn draw_chat(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let sidebar_width = if app.nav.sidebar_collapsed() {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_EXPANDED_WIDTH
    };
    let panes =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(0)]).split(area);
    let sidebar_area = panes[0];
    let main_area = panes[1];

    app.areas.sidebar = sidebar_area;
    draw_sidebar(frame, app, sidebar_area);

    if app.nav.active_view() == ActiveView::Map {
        draw_map(frame, app, main_area);
    } else {
        draw_conversation(frame, app, main_area);
    }
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" SmartDay ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.nav.sidebar_collapsed() {
        draw_collapsed_sidebar(frame, app, inner);
        return;
    }

    let mut index = 0u16;

    // User badge with sign-out affordance.
    if let Some(session) = &app.session {
        let badge_area = row(inner, index);
        app.areas.logout = badge_area;
        let line = Line::from(vec![
            Span::styled(
                format!("({}) ", session.initial()),
                Style::new().fg(ACTIVE_COLOR).bold(),
            ),
            Span::raw(session.display_name().to_string()),
            Span::styled("  sign out", Style::new().fg(DIM_COLOR)),
        ]);
        frame.render_widget(Paragraph::new(line), badge_area);
        index += 1;
    }

    let lock_area = row(inner, index);
    app.areas.lock_toggle = lock_area;
    let lock_label = if app.nav.sidebar_locked() {
        "[x] sidebar locked (F4)"
    } else {
        "[ ] sidebar locked (F4)"
    };
    frame.render_widget(
        Paragraph::new(Line::styled(lock_label, DIM_COLOR)),
        lock_area,
    );
    index += 2;

    // Nav items.
    let chat_area = row(inner, index);
    app.areas.nav_chat = chat_area;
    frame.render_widget(
        Paragraph::new(nav_line("Chat (F2)", app.nav.chat_nav_active())),
        chat_area,
    );
    index += 1;

    let map_area = row(inner, index);
    app.areas.nav_map = map_area;
    frame.render_widget(
        Paragraph::new(nav_line("Map (F3)", app.nav.map_nav_active())),
        map_area,
    );
    index += 2;

    // Preference block.
    frame.render_widget(
        Paragraph::new(Line::styled("Preferences", Style::new().bold())),
        row(inner, index),
    );
    index += 1;

    if let Some(preferences) = app.preferences.as_ref() {
        let selection = preferences.selection();
        for category in PreferenceCategory::iter() {
            let category_area = row(inner, index);
            app.areas.categories.push((category, category_area));
            let selected = selection.is_selected(category);
            let marker = if selected { "[x] " } else { "[ ] " };
            let style = if selected {
                Style::new().fg(ACTIVE_COLOR).bold()
            } else {
                Style::new()
            };
            frame.render_widget(
                Paragraph::new(Line::styled(format!("{marker}{category}"), style)),
                category_area,
            );
            index += 1;
        }
    }

    let save_area = row(inner, index);
    app.areas.save = save_area;
    frame.render_widget(
        Paragraph::new(Line::styled("[ Save preference (F5) ]", Style::new().bold())),
        save_area,
    );
    index += 1;

    if let Some((status, _)) = &app.status {
        let color = match status.kind {
            StatusKind::Info => INFO_COLOR,
            StatusKind::Error => ERROR_COLOR,
        };
        frame.render_widget(
            Paragraph::new(Line::styled(status.text.clone(), color)),
            row(inner, index),
        );
    }
    index += 2;

    // Map filter controls and the marker list, only while the map nav item
    // is active.
    if app.nav.map_nav_active() {
        frame.render_widget(
            Paragraph::new(Line::styled("Filters", Style::new().bold())),
            row(inner, index),
        );
        index += 1;

        let active_control = app.map.as_ref().and_then(|m| m.active_control());
        for dataset in MapDataset::iter() {
            let filter_area = row(inner, index);
            app.areas.filters.push((dataset, filter_area));
            let active = active_control == Some(dataset);
            let marker = if active { "● " } else { "○ " };
            let style = if active {
                Style::new().fg(Color::Yellow).bold()
            } else {
                Style::new()
            };
            let hint = match dataset {
                MapDataset::Parks => "F6",
                MapDataset::Restaurants => "F7",
            };
            frame.render_widget(
                Paragraph::new(Line::styled(format!("{marker}{dataset} ({hint})"), style)),
                filter_area,
            );
            index += 1;
        }
        index += 1;

        frame.render_widget(
            Paragraph::new(Line::styled("Markers (hover for details)", Style::new().bold())),
            row(inner, index),
        );
        index += 1;

        if let Some(map) = app.map.as_ref() {
            for (id, title) in map.surface().marker_titles() {
                let marker_area = row(inner, index);
                if marker_area.height == 0 {
                    break;
                }
                app.areas.marker_rows.push((id, marker_area));
                let hovered = app.hovered_marker == Some(id);
                let style = if hovered {
                    Style::new().fg(MARKER_COLOR).bold()
                } else {
                    Style::new()
                };
                frame.render_widget(
                    Paragraph::new(Line::styled(format!("• {title}"), style)),
                    marker_area,
                );
                index += 1;
            }
        }
    }
}

fn draw_collapsed_sidebar(frame: &mut Frame<'_>, app: &mut App, inner: Rect) {
    let mut index = 0u16;
    if let Some(session) = &app.session {
        frame.render_widget(
            Paragraph::new(Line::styled(
                session.initial(),
                Style::new().fg(ACTIVE_COLOR).bold(),
            )),
            row(inner, index),
        );
    }
    index += 2;

    let chat_area = row(inner, index);
    app.areas.nav_chat = chat_area;
    frame.render_widget(
        Paragraph::new(nav_line("C", app.nav.chat_nav_active())),
        chat_area,
    );
    index += 1;

    let map_area = row(inner, index);
    app.areas.nav_map = map_area;
    frame.render_widget(
        Paragraph::new(nav_line("M", app.nav.map_nav_active())),
        map_area,
    );
}

fn nav_line(label: &str, active: bool) -> Line<'static> {
    if active {
        Line::styled(format!("● {label}"), Style::new().fg(ACTIVE_COLOR).bold())
    } else {
        Line::styled(format!("○ {label}"), Style::new())
    }
}

fn draw_conversation(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let panes = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(area);
    let transcript_area = panes[0];
    let input_area = panes[1];

    let block = Block::default().borders(Borders::ALL).title(" Conversation ");
    let inner_height = block.inner(transcript_area).height as usize;

    let mut lines: Vec<Line> = Vec::new();
    if let Some(chat) = app.chat.as_ref() {
        for message in chat.transcript().messages() {
            let (prefix, color) = match message.sender {
                Sender::User => ("You: ", USER_COLOR),
                Sender::Bot => ("Bot: ", BOT_COLOR),
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, Style::new().fg(color).bold()),
                Span::raw(message.text.clone()),
            ]));
        }
    }
    // Keep the tail of the conversation in view.
    let scroll = lines.len().saturating_sub(inner_height) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        transcript_area,
    );

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input.clone()),
        Span::styled("█", Style::new().fg(DIM_COLOR)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Message "));
    frame.render_widget(input, input_area);
}

fn draw_map(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(map) = app.map.as_ref() else {
        return;
    };
    let surface = map.surface();
    if !surface.is_constructed() {
        frame.render_widget(
            Paragraph::new("Map unavailable.")
                .block(Block::default().borders(Borders::ALL).title(" Map ")),
            area,
        );
        return;
    }

    let coords: Vec<(f64, f64)> = surface
        .marker_positions()
        .map(|(_, coord)| (coord.lng, coord.lat))
        .collect();
    let hovered = surface.open_marker().and_then(|id| {
        surface
            .marker_positions()
            .find(|(marker_id, _)| *marker_id == id)
            .map(|(_, coord)| coord)
    });

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" Map "))
        .x_bounds(surface.x_bounds())
        .y_bounds(surface.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &coords,
                color: MARKER_COLOR,
            });
            if let Some(coord) = hovered {
                ctx.print(
                    coord.lng,
                    coord.lat,
                    Line::styled("◉", Style::new().fg(Color::Yellow).bold()),
                );
            }
        });
    frame.render_widget(canvas, area);

    // Hover-opened info window rendered beside the map corner.
    if let Some(info) = surface.open_info_content() {
        let width = (info.title.chars().count().max(info.phone.chars().count()) as u16 + 10)
            .min(area.width.saturating_sub(2));
        let popup = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y + 1,
            width,
            height: area.height.min(4),
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled(info.title.clone(), Style::new().bold()),
                Line::raw(format!("Phone: {}", info.phone)),
            ])
            .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

// ---------------------------------------------------------------------------
// Shared chrome
// ---------------------------------------------------------------------------

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hints = match app.screen {
        Screen::Login => "Tab fields · Enter submit · Ctrl+T sign-in/sign-up · Esc quit",
        Screen::Chat => {
            "Enter send · F2 chat · F3 map · F4 lock · F5 save · Alt+1-4 category · F10 sign out · Ctrl+C quit"
        }
    };
    frame.render_widget(Paragraph::new(Line::styled(hints, DIM_COLOR)), area);
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, notice: &str) {
    let popup = centered_rect(area, (notice.chars().count() as u16 + 6).clamp(24, 60), 5);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(vec![
            Line::raw(notice.to_string()),
            Line::default(),
            Line::styled("(press Esc)", DIM_COLOR),
        ])
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Notice ")),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// One sidebar row inside `inner`, or an empty rect past the bottom.
fn row(inner: Rect, index: u16) -> Rect {
    if index >= inner.height {
        Rect::default()
    } else {
        Rect::new(inner.x, inner.y + index, inner.width, 1)
    }
}
