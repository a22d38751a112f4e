use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono_tz::Tz;
use tokio::sync::mpsc;
use tracing::{debug, info};

use errscope_logs::{LogQuery, collect_matches};
use errscope_tui::{Action, AppState, Event, EventHandler, KeyBindings, KeyContext, LogViewerScreen, Tui};

/// Run the interactive viewer until the user quits
pub async fn run_app(log_path: PathBuf, query: LogQuery, tz: Tz, error_types: Vec<String>) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut state = AppState::new(log_path, query, tz, error_types);
    state.refresh();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(100));
    let keybindings = KeyBindings::new();

    render(&mut tui, &mut state)?;

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        let action = if state.ui_state.form_active {
                            keybindings.get_filter_input_action(&key)
                        } else if state.ui_state.help_visible || state.ui_state.detail_visible {
                            keybindings.get_action(KeyContext::Popup, &key)
                        } else {
                            keybindings.get_action(KeyContext::LogViewer, &key)
                        };
                        if let Some(action) = action {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Tick => {
                        let _ = action_tx.send(Action::Tick);
                    }
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_error(e);
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                handle_action(&mut state, action);
            }
        }

        if state.should_quit {
            break;
        }

        if state.render_dirty {
            render(&mut tui, &mut state)?;
        }
    }

    events.shutdown();
    tui.restore()?;
    Ok(())
}

fn handle_action(state: &mut AppState, action: Action) {
    if action != Action::Tick {
        state.render_dirty = true;
    }

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::GoBack => {
            // Close the topmost overlay, quit from the bare table
            if state.ui_state.help_visible {
                state.ui_state.help_visible = false;
            } else if state.ui_state.detail_visible {
                state.ui_state.detail_visible = false;
            } else if state.ui_state.form_active {
                state.cancel_filter();
            } else {
                state.should_quit = true;
            }
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }
        Action::ToggleStats => {
            state.ui_state.stats_visible = !state.ui_state.stats_visible;
            if state.ui_state.stats_visible {
                state.refresh();
            } else {
                state.counts = None;
            }
        }
        Action::ToggleDetail => {
            state.ui_state.detail_visible = !state.ui_state.detail_visible && state.selected_record().is_some();
        }
        Action::SelectUp => state.select_up(),
        Action::SelectDown => state.select_down(),
        Action::SelectFirst => state.select_first(),
        Action::SelectLast => state.select_last(),
        Action::NextPage => state.next_page(),
        Action::PrevPage => state.prev_page(),
        Action::FirstPage => state.go_to_page(1),
        Action::LastPage => state.last_page(),
        Action::OpenFilter => state.start_filter(),
        Action::CloseFilter => state.cancel_filter(),
        Action::ApplyFilter => state.apply_filter(),
        Action::FilterInput(c) => state.ui_state.form.input_char(c),
        Action::FilterBackspace => state.ui_state.form.backspace(),
        Action::FilterClearField => state.ui_state.form.clear_field(),
        Action::FilterNextField => state.ui_state.form.next_field(),
        Action::FilterPrevField => state.ui_state.form.prev_field(),
        Action::CycleErrorType => state.cycle_error_type(true),
        Action::CycleErrorTypeBack => state.cycle_error_type(false),
        Action::ClearFilters => state.clear_filters(),
        Action::Reload => {
            state.refresh();
            if let Some(page) = &state.page {
                let msg = format!("Reloaded: {} matching entries", page.total_matched);
                state.show_error(msg);
            }
        }
        Action::ExportMatches => {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let filename = format!("errscope_{}.log", timestamp);
            match export_matches_to_file(&filename, state) {
                Ok(count) => {
                    info!(count, file = %filename, "exported matches");
                    state.show_error(format!("Exported {} entries to {}", count, filename));
                }
                Err(e) => {
                    state.show_error(format!("Export failed: {:#}", e));
                }
            }
        }
        Action::Tick => state.tick(),
        Action::Render => {}
    }
}

fn render(tui: &mut Tui, state: &mut AppState) -> Result<()> {
    tui.draw(|frame| LogViewerScreen::render(frame, state))?;
    state.render_dirty = false;
    Ok(())
}

/// Write every entry matching the applied criteria, across all pages
fn export_matches_to_file(filename: &str, state: &AppState) -> Result<usize> {
    let matches = collect_matches(&state.log_path, &state.query.criteria)?;
    let mut file = BufWriter::new(File::create(filename)?);

    for record in &matches {
        writeln!(file, "{}", record)?;
    }
    file.flush()?;

    debug!(count = matches.len(), "export written");
    Ok(matches.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
[10-Nov-2024 08:00:00 UTC] PHP Warning: first in /a.php on line 1
[10-Nov-2024 08:00:01 UTC] PHP Notice: second in /a.php on line 2
[10-Nov-2024 08:00:02 UTC] PHP Warning: third in /a.php on line 3
";

    fn state_for(per_page: usize) -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        let query = LogQuery::new(Default::default(), 1, per_page);
        let mut state = AppState::new(file.path().to_path_buf(), query, Tz::UTC, vec!["Warning".to_string()]);
        state.refresh();
        (state, file)
    }

    #[test]
    fn test_go_back_closes_overlays_first() {
        let (mut state, _file) = state_for(10);
        handle_action(&mut state, Action::ToggleDetail);
        handle_action(&mut state, Action::ToggleHelp);
        assert!(state.ui_state.detail_visible);

        handle_action(&mut state, Action::GoBack);
        assert!(!state.ui_state.help_visible);
        assert!(state.ui_state.detail_visible);

        handle_action(&mut state, Action::GoBack);
        assert!(!state.ui_state.detail_visible);
        assert!(!state.should_quit);

        handle_action(&mut state, Action::GoBack);
        assert!(state.should_quit);
    }

    #[test]
    fn test_filter_form_actions() {
        let (mut state, _file) = state_for(10);
        handle_action(&mut state, Action::OpenFilter);
        for c in "third".chars() {
            handle_action(&mut state, Action::FilterInput(c));
        }
        handle_action(&mut state, Action::ApplyFilter);

        assert!(!state.ui_state.form_active);
        assert_eq!(state.query.criteria.keyword(), Some("third"));
        assert_eq!(state.page.as_ref().unwrap().total_matched, 1);

        handle_action(&mut state, Action::ClearFilters);
        assert_eq!(state.page.as_ref().unwrap().total_matched, 3);
    }

    #[test]
    fn test_stats_follow_toggle() {
        let (mut state, _file) = state_for(1);
        handle_action(&mut state, Action::ToggleStats);
        let counts = state.counts.as_ref().unwrap();
        assert_eq!(counts.tag("warning"), 2);
        assert_eq!(counts.total(), 3);

        handle_action(&mut state, Action::ToggleStats);
        assert!(state.counts.is_none());
    }

    #[test]
    fn test_export_writes_all_pages() {
        let (mut state, _file) = state_for(1);
        handle_action(&mut state, Action::CycleErrorType);
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out.log");

        let count = export_matches_to_file(target.to_str().unwrap(), &state).unwrap();
        assert_eq!(count, 2);
        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec![
                "[10-Nov-2024 08:00:00 UTC] PHP Warning: first in /a.php on line 1",
                "[10-Nov-2024 08:00:02 UTC] PHP Warning: third in /a.php on line 3",
            ]
        );
    }
}
