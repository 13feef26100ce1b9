//! UI rendering for the widget gallery.
//!
//! The document is drawn as an indented outline, one element per row.
//! Hidden elements are skipped, the focused element is highlighted, and
//! each row is recorded as a hit area for pointer presses.

use crate::app::App;
use a11y_widgets::{aria, Document, ElementId, ElementKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Draw the application.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer/status
        ])
        .split(f.area());

    app.hit_areas.clear();
    draw_header(f, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);

    if app.dialog_open() {
        draw_dialog(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("Tab/Shift+Tab:Focus  Enter/Space:Activate  Arrows:Tabs  Esc:Dismiss  Ctrl+Q:Quit")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" Widget Gallery "))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_content(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let doc = app.page.document();
    let body = doc.body();
    let rows = outline(doc, body, Some(app.showcase.dialog));
    draw_outline(f, doc, &rows, columns[0], " Page ", &mut app.hit_areas);
    draw_history(f, &app.history, columns[1]);
}

fn draw_dialog(f: &mut Frame, app: &mut App) {
    let area = centered_rect(50, 40, f.area());
    f.render_widget(Clear, area);

    let doc = app.page.document();
    let dialog = app.showcase.dialog;
    let title = format!(" {} ", doc.accessible_name(dialog).unwrap_or("Dialog"));
    let rows = outline(doc, dialog, None);
    draw_outline(f, doc, &rows, area, &title, &mut app.hit_areas);
}

fn draw_history(f: &mut Frame, history: &[String], area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = history
        .iter()
        .skip(history.len().saturating_sub(visible))
        .map(|msg| ListItem::new(msg.as_str()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Announcements "));
    f.render_widget(list, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let doc = app.page.document();
    let focus = match doc.focused() {
        Some(id) => format!("Focus: {}", describe(doc, id).unwrap_or_else(|| id.to_string())),
        None => "Focus: page".to_string(),
    };
    let status = app
        .status
        .as_ref()
        .map(|a| a.message.as_str())
        .unwrap_or("");

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(focus, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(status, Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

/// Visible elements under `root` with their depth, skipping `exclude`.
fn outline(doc: &Document, root: ElementId, exclude: Option<ElementId>) -> Vec<(ElementId, usize)> {
    doc.descendants(root)
        .into_iter()
        .filter(|id| !doc.is_hidden(*id))
        .filter(|id| exclude.map_or(true, |ex| !doc.contains_node(ex, *id)))
        .filter(|id| describe(doc, *id).is_some())
        .map(|id| (id, depth_below(doc, root, id)))
        .collect()
}

fn depth_below(doc: &Document, root: ElementId, id: ElementId) -> usize {
    let mut depth = 0;
    let mut current = doc.get(id).and_then(|el| el.parent());
    while let Some(parent) = current {
        if parent == root {
            break;
        }
        depth += 1;
        current = doc.get(parent).and_then(|el| el.parent());
    }
    depth
}

fn draw_outline(
    f: &mut Frame,
    doc: &Document,
    rows: &[(ElementId, usize)],
    area: Rect,
    title: &str,
    hit_areas: &mut Vec<(Rect, ElementId)>,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let focused = doc.focused();
    let lines: Vec<Line> = rows
        .iter()
        .take(inner.height as usize)
        .enumerate()
        .map(|(i, (id, depth))| {
            hit_areas.push((Rect::new(inner.x, inner.y + i as u16, inner.width, 1), *id));
            let text = describe(doc, *id).unwrap_or_default();
            let style = if focused == Some(*id) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                element_style(doc, *id)
            };
            Line::from(vec![
                Span::raw("  ".repeat(*depth)),
                Span::styled(text, style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

/// One-line rendering of an element, or None for plain layout containers.
fn describe(doc: &Document, id: ElementId) -> Option<String> {
    let el = doc.get(id)?;
    let name = doc.accessible_name(id).unwrap_or("");
    let text = match el.kind {
        ElementKind::Body => return None,
        ElementKind::Container => {
            let role = el.attr(aria::ROLE)?;
            if name.is_empty() {
                format!("{role}:")
            } else {
                format!("{role}: {name}")
            }
        }
        ElementKind::Button => format!("[ {name} ]{}", markers(doc, id)),
        ElementKind::Link => format!("<{name}>"),
        ElementKind::Input => format!("{}: [__________]", el.attr("name").unwrap_or(name)),
        ElementKind::Text => name.to_string(),
    };
    Some(text)
}

fn markers(doc: &Document, id: ElementId) -> &'static str {
    if doc.attr(id, aria::ROLE) == Some(aria::ROLE_TAB) {
        return match doc.bool_attr(id, aria::SELECTED) {
            Some(true) => " *",
            _ => "",
        };
    }
    match doc.bool_attr(id, aria::EXPANDED) {
        Some(true) => " ▾",
        Some(false) => " ▸",
        None => "",
    }
}

fn element_style(doc: &Document, id: ElementId) -> Style {
    if doc.bool_attr(id, aria::SELECTED) == Some(true) {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if doc.has_attr(id, aria::DATA_DISMISS) {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase;
    use a11y_widgets::Page;

    fn mounted() -> (Page, ElementId) {
        let mut page = Page::new();
        let dialog = showcase::mount(&mut page).unwrap().dialog;
        (page, dialog)
    }

    fn el(doc: &Document, html_id: &str) -> ElementId {
        doc.element_by_id(html_id).unwrap()
    }

    #[test]
    fn test_outline_skips_hidden_and_layout() {
        let (page, dialog) = mounted();
        let doc = page.document();
        let ids: Vec<_> = outline(doc, doc.body(), Some(dialog))
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        assert!(ids.contains(&el(doc, "file-trigger")));
        assert!(ids.contains(&el(doc, "profile-tab-3")));
        assert!(!ids.contains(&el(doc, "file-item-1")));
        assert!(!ids.contains(&el(doc, "preferences-theme")));
        assert!(!ids.contains(&el(doc, "help")));
    }

    #[test]
    fn test_dialog_outline_is_relative_to_dialog() {
        let (mut page, dialog) = mounted();
        assert!(outline(page.document(), dialog, None).is_empty());

        let opener = el(page.document(), "open-preferences");
        page.click(opener);
        let doc = page.document();
        let rows = outline(doc, dialog, None);
        assert_eq!(rows.first(), Some(&(el(doc, "preferences-title"), 0)));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_describe_markers() {
        let (page, _) = mounted();
        let doc = page.document();
        assert_eq!(
            describe(doc, el(doc, "help-q-1")).as_deref(),
            Some("[ What is a focus trap? ] ▸")
        );
        assert_eq!(describe(doc, el(doc, "profile-tab-1")).as_deref(), Some("[ Overview ] *"));
        assert_eq!(describe(doc, el(doc, "profile-tab-2")).as_deref(), Some("[ Activity ]"));
        assert_eq!(
            describe(doc, el(doc, "preferences-theme")).as_deref(),
            Some("theme: [__________]")
        );
    }
}
