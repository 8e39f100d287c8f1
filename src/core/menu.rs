//! Menu and status indicator render model
//!
//! Pure functions from state to a descriptor tree; the presentation layer
//! decides how to draw it.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::core::features::translator::HistoryStore;
use crate::core::state::Configuration;
use crate::shared::types::{char_count, Language};

/// History text is wrapped into lines of this many graphemes
pub const MENU_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "arg", rename_all = "snake_case")]
pub enum MenuAction {
    PromptTranslate,
    SelectLanguage(Language),
    ToggleAutoCopy,
    TogglePause,
    CopyOriginal(usize),
    CopyTranslation(usize),
    Refresh,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuItem {
    Separator,
    /// Non-interactive line
    Label { title: String },
    Action {
        title: String,
        action: MenuAction,
        key: Option<char>,
        checked: Option<bool>,
    },
    Submenu { title: String, items: Vec<MenuItem> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuModel {
    pub items: Vec<MenuItem>,
}

/// What the status bar pill shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIndicator {
    pub language_code: String,
    pub auto_copy: bool,
    pub paused: bool,
}

fn label(title: impl Into<String>) -> MenuItem {
    MenuItem::Label { title: title.into() }
}

fn action(title: impl Into<String>, action: MenuAction, key: Option<char>) -> MenuItem {
    MenuItem::Action {
        title: title.into(),
        action,
        key,
        checked: None,
    }
}

fn toggle(title: impl Into<String>, action: MenuAction, key: Option<char>, checked: bool) -> MenuItem {
    MenuItem::Action {
        title: title.into(),
        action,
        key,
        checked: Some(checked),
    }
}

/// Split text into lines of at most `width` graphemes
pub fn chunk_text(text: &str, width: usize) -> Vec<String> {
    if char_count(text) <= width {
        return vec![text.to_string()];
    }
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    graphemes.chunks(width).map(|chunk| chunk.concat()).collect()
}

pub fn render_status(config: &Configuration) -> StatusIndicator {
    StatusIndicator {
        language_code: config.target_lang().code().to_uppercase(),
        auto_copy: config.auto_copy_enabled(),
        paused: config.is_paused(),
    }
}

pub fn render_menu(config: &Configuration, history: &HistoryStore) -> MenuModel {
    let mut items = vec![
        label("Translator"),
        MenuItem::Separator,
        action("Translate Text…", MenuAction::PromptTranslate, Some('t')),
        MenuItem::Separator,
    ];

    let languages = Language::ALL
        .iter()
        .map(|lang| toggle(lang.name(), MenuAction::SelectLanguage(*lang), None, *lang == config.target_lang()))
        .collect();
    items.push(MenuItem::Submenu {
        title: "Target Language".to_string(),
        items: languages,
    });
    items.push(MenuItem::Separator);

    items.push(toggle("Auto-copy Translation", MenuAction::ToggleAutoCopy, Some('a'), config.auto_copy_enabled()));
    let pause_title = if config.is_paused() { "Resume" } else { "Pause" };
    items.push(action(pause_title, MenuAction::TogglePause, Some('p')));
    items.push(MenuItem::Separator);

    if !history.is_empty() {
        let entries = history
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut sub = vec![
                    action("Copy Orig", MenuAction::CopyOriginal(index), None),
                    action("Copy Trans", MenuAction::CopyTranslation(index), None),
                    MenuItem::Separator,
                    label("Original:"),
                ];
                sub.extend(chunk_text(&entry.original, MENU_LINE_WIDTH).into_iter().map(label));
                sub.push(MenuItem::Separator);
                sub.push(label("Translation:"));
                sub.extend(chunk_text(&entry.translated, MENU_LINE_WIDTH).into_iter().map(label));
                MenuItem::Submenu {
                    title: entry.direction_label(),
                    items: sub,
                }
            })
            .collect();
        items.push(MenuItem::Submenu {
            title: "History".to_string(),
            items: entries,
        });
        items.push(MenuItem::Separator);
    }

    items.push(action("Refresh", MenuAction::Refresh, Some('r')));
    items.push(MenuItem::Separator);
    items.push(action("Quit", MenuAction::Quit, Some('q')));

    MenuModel { items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{TranslationRequest, TranslationResult};

    fn find_submenu<'a>(menu: &'a MenuModel, title: &str) -> Option<&'a Vec<MenuItem>> {
        menu.items.iter().find_map(|item| match item {
            MenuItem::Submenu { title: t, items } if t == title => Some(items),
            _ => None,
        })
    }

    #[test]
    fn test_chunk_text() {
        assert_eq!(chunk_text("short", 80), vec!["short"]);
        let long = "a".repeat(170);
        let chunks = chunk_text(&long, 80);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 10);
    }

    #[test]
    fn test_target_language_is_checked() {
        let config = Configuration::new(Language::Ko, false);
        let menu = render_menu(&config, &HistoryStore::default());

        let languages = find_submenu(&menu, "Target Language").unwrap();
        let checked: Vec<_> = languages
            .iter()
            .filter_map(|item| match item {
                MenuItem::Action { title, checked: Some(true), .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(checked, vec!["Korean"]);
        assert_eq!(languages.len(), Language::ALL.len());
    }

    #[test]
    fn test_history_hidden_when_empty() {
        let menu = render_menu(&Configuration::default(), &HistoryStore::default());
        assert!(find_submenu(&menu, "History").is_none());
    }

    #[test]
    fn test_history_entries_have_copy_actions() {
        let mut history = HistoryStore::default();
        let request = TranslationRequest::new("Bonjour", "fr", "en");
        history.record(TranslationResult::from_request(&request, "Hello".to_string()));

        let menu = render_menu(&Configuration::default(), &history);
        let entries = find_submenu(&menu, "History").unwrap();

        match &entries[0] {
            MenuItem::Submenu { title, items } => {
                assert_eq!(title, "FR → EN");
                assert!(items.contains(&action("Copy Orig", MenuAction::CopyOriginal(0), None)));
                assert!(items.contains(&action("Copy Trans", MenuAction::CopyTranslation(0), None)));
                assert!(items.contains(&label("Hello")));
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_pause_label_follows_state() {
        let mut config = Configuration::default();
        config.toggle_pause();
        let menu = render_menu(&config, &HistoryStore::default());
        assert!(menu.items.contains(&action("Resume", MenuAction::TogglePause, Some('p'))));
    }

    #[test]
    fn test_status_indicator() {
        let mut config = Configuration::new(Language::Es, true);
        config.toggle_pause();
        assert_eq!(
            render_status(&config),
            StatusIndicator { language_code: "ES".to_string(), auto_copy: true, paused: true }
        );
    }
}
