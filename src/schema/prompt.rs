//! Interactive questions asked when no schema file is given

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::core::error::Result;

/// Source of answers for interactive generation
///
/// Free-text answers are returned as typed; callers decide what counts as blank.
pub trait Prompter {
    fn input(&self, message: &str) -> Result<String>;
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
    /// Returns the indices of the chosen items
    fn multi_select(&self, message: &str, items: &[&str], defaults: &[bool]) -> Result<Vec<usize>>;
    /// Returns the index of the chosen item
    fn select(&self, message: &str, items: &[String]) -> Result<usize>;
}

/// Prompter backed by the controlling terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, message: &str) -> Result<String> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact_on(&self.term)?)
    }

    fn multi_select(&self, message: &str, items: &[&str], defaults: &[bool]) -> Result<Vec<usize>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .defaults(defaults)
            .interact_on(&self.term)?)
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_on(&self.term)?)
    }
}

/// Prompter that replays canned answers, for tests
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: std::cell::RefCell<std::collections::VecDeque<String>>,
    confirms: std::cell::RefCell<std::collections::VecDeque<bool>>,
    selections: std::cell::RefCell<std::collections::VecDeque<Vec<usize>>>,
    pub asked: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(self, answer: &str) -> Self {
        self.inputs.borrow_mut().push_back(answer.to_string());
        self
    }

    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn with_selection(self, indices: &[usize]) -> Self {
        self.selections.borrow_mut().push_back(indices.to_vec());
        self
    }

    fn record(&self, message: &str) {
        self.asked.borrow_mut().push(message.to_string());
    }

    fn exhausted(message: &str) -> crate::core::Error {
        crate::core::Error::Prompt(format!("no scripted answer for '{message}'"))
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn input(&self, message: &str) -> Result<String> {
        self.record(message);
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Self::exhausted(message))
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        self.record(message);
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Self::exhausted(message))
    }

    fn multi_select(&self, message: &str, _items: &[&str], _defaults: &[bool]) -> Result<Vec<usize>> {
        self.record(message);
        self.selections
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Self::exhausted(message))
    }

    fn select(&self, message: &str, _items: &[String]) -> Result<usize> {
        self.record(message);
        self.selections
            .borrow_mut()
            .pop_front()
            .and_then(|s| s.first().copied())
            .ok_or_else(|| Self::exhausted(message))
    }
}
