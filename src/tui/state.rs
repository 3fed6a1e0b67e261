use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::debug;

use super::types::{FormField, Mode, OptionsFocus};
use crate::hosts::{self, Host};
use crate::monitor::status;
use crate::monitor::types::{ProbeOutcome, StatusRecord};
use crate::sort::{self, SORT_CHOICES, SortKey};

/// Bounds of the poll interval, in seconds.
pub const MIN_INTERVAL_SECS: f64 = 0.5;
pub const MAX_INTERVAL_SECS: f64 = 5.0;

const MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Status notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Minimal single-line text input with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, ch: char) {
        let i = self.byte_index();
        self.value.insert(i, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let i = self.byte_index();
            self.value.remove(i);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let i = self.byte_index();
            self.value.remove(i);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Value with an inline cursor marker, for rendering the focused field.
    pub fn display_with_cursor(&self) -> String {
        let mut shown = self.value.clone();
        shown.insert(self.byte_index(), '|');
        shown
    }
}

/// Two-field draft used by both the Add and Edit dialogs.
#[derive(Debug, Clone, Default)]
pub struct HostForm {
    pub address: TextInput,
    pub description: TextInput,
    pub focus: FormField,
}

impl HostForm {
    fn from_host(host: &Host) -> Self {
        Self {
            address: TextInput::with_value(&host.address),
            description: TextInput::with_value(&host.description),
            focus: FormField::Address,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            FormField::Address => &mut self.address,
            FormField::Description => &mut self.description,
        }
    }

    pub fn advance_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Address => FormField::Description,
            FormField::Description => FormField::Address,
        };
    }
}

/// Draft state of the options dialog.
#[derive(Debug, Clone, Default)]
pub struct OptionsForm {
    pub interval: TextInput,
    pub sort_index: usize,
    pub focus: OptionsFocus,
}

/// Parse an options-dialog interval, accepting a comma decimal separator.
/// Returns the value in seconds only when it lies inside the allowed range.
pub fn parse_interval(input: &str) -> Option<f64> {
    let secs: f64 = input.trim().replace(',', ".").parse().ok()?;
    (MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs).then_some(secs)
}

/// Application state: the single mutable model. Every mutation happens on
/// the TUI loop's task, one event at a time; probe rounds only ever see
/// cloned addresses and report back over the bus.
pub struct AppState {
    pub hosts: Vec<Host>,
    /// Index-aligned with `hosts`; rebuilt in lockstep on structural edits.
    pub records: Vec<StatusRecord>,
    pub cursor: usize,
    pub mode: Mode,
    pub sort_key: SortKey,
    pub interval: Duration,
    /// Bumped on every change to host identity or order; probe rounds are
    /// tagged with it so stale deliveries can be discarded.
    pub epoch: u64,
    /// When the next probe round should be armed; `None` while one is owed
    /// to an in-flight round.
    pub next_round_at: Option<Instant>,

    pub form: HostForm,
    pub edit_index: usize,
    pub confirm_index: usize,
    pub options: OptionsForm,

    pub status_message: Option<(String, Instant, StatusLevel)>,
    pub hosts_path: PathBuf,
    pub width: u16,
    pub height: u16,
}

impl AppState {
    pub fn new(hosts: Vec<Host>, hosts_path: PathBuf, interval: Duration, sort_key: SortKey) -> Self {
        let records = vec![StatusRecord::default(); hosts.len()];
        let mut state = Self {
            hosts,
            records,
            cursor: 0,
            mode: Mode::List,
            sort_key,
            interval,
            epoch: 0,
            next_round_at: Some(Instant::now()),
            form: HostForm::default(),
            edit_index: 0,
            confirm_index: 0,
            options: OptionsForm::default(),
            status_message: None,
            hosts_path,
            width: 0,
            height: 0,
        };
        state.resort();
        state
    }

    /// Set a status notification (auto-clears after a few seconds)
    pub fn set_status(&mut self, msg: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((msg.into(), Instant::now(), level));
    }

    /// Clear expired status messages
    pub fn clear_expired_status(&mut self) {
        if let Some((_, created, _)) = &self.status_message {
            if created.elapsed() > MESSAGE_TTL {
                self.status_message = None;
            }
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.hosts.len() {
            self.cursor += 1;
        }
    }

    /// If a probe round is due, consume the deadline and hand back the epoch
    /// plus the addresses to sweep. The caller spawns the round off-loop.
    pub fn take_due_round(&mut self, now: Instant) -> Option<(u64, Vec<String>)> {
        if self.next_round_at.is_some_and(|at| at <= now) {
            self.next_round_at = None;
            Some((self.epoch, self.hosts.iter().map(|h| h.address.clone()).collect()))
        } else {
            None
        }
    }

    /// Apply a delivered probe round. Returns the number of reachability
    /// transitions so the caller can sound the alert; stale deliveries
    /// (epoch or length mismatch) are discarded without mutation.
    pub fn apply_round(
        &mut self,
        epoch: u64,
        outcomes: &[ProbeOutcome],
        now: DateTime<Local>,
        mono_now: Instant,
    ) -> usize {
        if epoch != self.epoch {
            debug!(delivered = epoch, current = self.epoch, "discarding stale probe round");
            return 0;
        }
        let Some((records, transitions)) =
            status::reconcile(&self.records, outcomes, now, mono_now)
        else {
            debug!(
                batch = outcomes.len(),
                records = self.records.len(),
                "discarding length-mismatched probe round"
            );
            self.next_round_at = Some(mono_now + self.interval);
            return 0;
        };
        self.records = records;
        self.next_round_at = Some(mono_now + self.interval);
        transitions
    }

    pub fn open_add(&mut self) {
        self.form = HostForm::default();
        self.mode = Mode::Add;
    }

    pub fn open_edit(&mut self) {
        let Some(host) = self.hosts.get(self.cursor) else { return };
        self.form = HostForm::from_host(host);
        self.edit_index = self.cursor;
        self.mode = Mode::Edit;
    }

    pub fn open_delete(&mut self) {
        if self.hosts.get(self.cursor).is_none() {
            return;
        }
        self.confirm_index = self.cursor;
        self.mode = Mode::ConfirmDelete;
    }

    pub fn open_options(&mut self) {
        self.options = OptionsForm {
            interval: TextInput::with_value(format!("{:.1}", self.interval.as_secs_f64())),
            sort_index: SORT_CHOICES.iter().position(|&k| k == self.sort_key).unwrap_or(0),
            focus: OptionsFocus::Interval,
        };
        self.mode = Mode::Options;
    }

    /// Leave any dialog, discarding its draft.
    pub fn cancel_dialog(&mut self) {
        self.mode = Mode::List;
    }

    /// Confirm the add/edit form. An empty address is rejected in place; a
    /// valid one is committed, both sequences are rebuilt in lockstep, the
    /// current sort is reapplied and the cursor follows the committed host.
    pub fn commit_form(&mut self) {
        let address = self.form.address.value.trim().to_string();
        let description = self.form.description.value.trim().to_string();
        if address.is_empty() {
            self.set_status("Host cannot be empty", StatusLevel::Error);
            return;
        }

        match self.mode {
            Mode::Add => {
                self.hosts.push(Host { address: address.clone(), description });
            }
            Mode::Edit => {
                if let Some(host) = self.hosts.get_mut(self.edit_index) {
                    *host = Host { address: address.clone(), description };
                }
            }
            _ => return,
        }

        // Every row restarts unobserved; the immediate round repopulates
        // them within one interval.
        self.records = vec![StatusRecord::default(); self.hosts.len()];
        self.resort();
        self.cursor = self.hosts.iter().position(|h| h.address == address).unwrap_or(0);
        self.mode = Mode::List;
        self.structural_edit();
    }

    pub fn confirm_delete(&mut self) {
        if self.confirm_index < self.hosts.len() {
            self.hosts.remove(self.confirm_index);
            self.records.remove(self.confirm_index);
            if self.cursor >= self.hosts.len() && self.cursor > 0 {
                self.cursor -= 1;
            }
            self.set_status("Host deleted", StatusLevel::Info);
            self.structural_edit();
        }
        self.mode = Mode::List;
    }

    /// Confirm the options dialog. An invalid interval is rejected with the
    /// dialog left open; on success the new interval and sort key apply, the
    /// status history is remapped by address identity and a round is armed
    /// immediately so the change takes effect without waiting a full period.
    pub fn commit_options(&mut self) {
        let Some(secs) = parse_interval(&self.options.interval.value) else {
            self.set_status("Interval must be between 0.5 and 5 seconds", StatusLevel::Error);
            return;
        };
        self.interval = Duration::from_secs_f64(secs);
        self.sort_key = SORT_CHOICES[self.options.sort_index.min(SORT_CHOICES.len() - 1)];

        // A resort must never lose or misattribute history: rebind records
        // to their hosts by address, not by old index.
        let old_hosts = self.hosts.clone();
        let old_records = self.records.clone();
        self.resort();
        self.records = remap_by_address(&self.hosts, &old_hosts, &old_records);

        self.cursor = 0;
        self.mode = Mode::List;
        self.structural_edit();
    }

    pub fn save_hosts(&mut self) {
        match hosts::save(&self.hosts_path, &self.hosts) {
            Ok(()) => self.set_status("Hosts saved", StatusLevel::Success),
            Err(e) => self.set_status(format!("Failed to save: {e}"), StatusLevel::Error),
        }
    }

    pub fn reload_hosts(&mut self) {
        match hosts::load(&self.hosts_path) {
            Ok(loaded) => {
                self.hosts = loaded;
                self.records = vec![StatusRecord::default(); self.hosts.len()];
                self.cursor = 0;
                self.resort();
                self.set_status("Hosts reloaded", StatusLevel::Success);
                self.structural_edit();
            }
            Err(e) => self.set_status(format!("Failed to reload: {e}"), StatusLevel::Error),
        }
    }

    fn resort(&mut self) {
        let perm = sort::order(&self.hosts, &self.records, self.sort_key, Local::now());
        sort::apply_permutation(&perm, &mut self.hosts, &mut self.records);
    }

    /// Bump the host-set epoch and arm an immediate probe round. Any round
    /// still in flight now carries a stale epoch and will be discarded on
    /// delivery.
    fn structural_edit(&mut self) {
        self.epoch += 1;
        self.next_round_at = Some(Instant::now());
    }
}

fn remap_by_address(
    new_hosts: &[Host],
    old_hosts: &[Host],
    old_records: &[StatusRecord],
) -> Vec<StatusRecord> {
    new_hosts
        .iter()
        .map(|host| {
            old_hosts
                .iter()
                .position(|old| old.address == host.address)
                .and_then(|i| old_records.get(i).copied())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(address: &str, description: &str) -> Host {
        Host { address: address.into(), description: description.into() }
    }

    fn state_with(hosts: Vec<Host>) -> AppState {
        AppState::new(hosts, PathBuf::from("hosts.txt"), Duration::from_secs(5), SortKey::Name)
    }

    fn type_into(input: &mut TextInput, text: &str) {
        for ch in text.chars() {
            input.insert(ch);
        }
    }

    #[test]
    fn test_initial_sort_applied() {
        let state = state_with(vec![host("b.example", "B"), host("a.example", "A")]);
        assert_eq!(state.hosts[0].address, "a.example");
        assert_eq!(state.hosts[1].address, "b.example");
        assert_eq!(state.records.len(), 2);
    }

    #[test]
    fn test_commit_form_rejects_empty_address() {
        let mut state = state_with(vec![host("a.example", "A")]);
        state.open_add();
        type_into(&mut state.form.description, "no address");
        state.commit_form();

        assert_eq!(state.mode, Mode::Add);
        assert_eq!(state.hosts.len(), 1);
        assert_eq!(state.epoch, 0);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_commit_form_adds_sorts_and_relocates_cursor() {
        let mut state = state_with(vec![host("a.example", "A"), host("c.example", "C")]);
        state.open_add();
        type_into(&mut state.form.address, "b.example");
        state.form.advance_focus();
        type_into(&mut state.form.description, "B");
        state.commit_form();

        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.hosts[1].address, "b.example");
        assert_eq!(state.cursor, 1);
        assert_eq!(state.records.len(), 3);
        assert!(state.records.iter().all(|r| r.last_change.is_none()));
        assert_eq!(state.epoch, 1);
        assert!(state.next_round_at.is_some());
    }

    #[test]
    fn test_edit_overwrites_in_place() {
        let mut state = state_with(vec![host("a.example", "A"), host("b.example", "B")]);
        state.cursor = 0;
        state.open_edit();
        state.form.address = TextInput::with_value("z.example");
        state.commit_form();

        assert_eq!(state.hosts.len(), 2);
        assert_eq!(state.hosts[1].address, "z.example");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_delete_last_row_pulls_cursor_back() {
        let mut state = state_with(vec![host("a", ""), host("b", ""), host("c", "")]);
        state.cursor = 2;
        state.open_delete();
        state.confirm_delete();

        assert_eq!(state.hosts.len(), 2);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn test_delete_non_last_row_keeps_cursor_index() {
        let mut state = state_with(vec![host("a", ""), host("b", ""), host("c", "")]);
        state.cursor = 1;
        state.open_delete();
        state.confirm_delete();

        assert_eq!(state.cursor, 1);
        assert_eq!(state.hosts[1].address, "c");
    }

    #[test]
    fn test_delete_on_empty_set_is_a_no_op() {
        let mut state = state_with(Vec::new());
        state.open_delete();
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn test_parse_interval_bounds() {
        assert_eq!(parse_interval("0.4"), None);
        assert_eq!(parse_interval("6"), None);
        assert_eq!(parse_interval("abc"), None);
        assert_eq!(parse_interval("2.5"), Some(2.5));
        assert_eq!(parse_interval("0.5"), Some(0.5));
        assert_eq!(parse_interval("5.0"), Some(5.0));
        // Locale decimal separator is normalised.
        assert_eq!(parse_interval("2,5"), Some(2.5));
    }

    #[test]
    fn test_commit_options_rejects_bad_interval() {
        let mut state = state_with(vec![host("a", "")]);
        state.open_options();
        state.options.interval = TextInput::with_value("0.4");
        state.commit_options();

        assert_eq!(state.mode, Mode::Options);
        assert_eq!(state.interval, Duration::from_secs(5));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_commit_options_remaps_history_by_address() {
        let mut state = state_with(vec![host("a.example", ""), host("b.example", "")]);
        let now = Local::now();
        let mono = Instant::now();
        // a down, b up: a status sort will swap the rows.
        let batch = [ProbeOutcome::down(), ProbeOutcome::up(Some(7.0))];
        assert_eq!(state.apply_round(0, &batch, now, mono), 0);

        state.open_options();
        state.options.sort_index =
            SORT_CHOICES.iter().position(|&k| k == SortKey::Status).unwrap();
        state.options.interval = TextInput::with_value("1,5");
        state.commit_options();

        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.interval, Duration::from_secs_f64(1.5));
        assert_eq!(state.sort_key, SortKey::Status);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.hosts[0].address, "b.example");
        assert!(state.records[0].reachable);
        assert_eq!(state.records[0].latency_ms, Some(7.0));
        assert!(!state.records[1].reachable);
    }

    #[test]
    fn test_stale_epoch_round_is_discarded() {
        let mut state = state_with(vec![host("a", ""), host("b", "")]);
        state.cursor = 1;
        state.open_delete();
        state.confirm_delete(); // epoch is now 1

        let stale = [ProbeOutcome::up(Some(1.0)), ProbeOutcome::up(Some(2.0))];
        assert_eq!(state.apply_round(0, &stale, Local::now(), Instant::now()), 0);
        assert!(state.records.iter().all(|r| r.last_change.is_none()));
    }

    #[test]
    fn test_length_mismatched_round_is_discarded() {
        let mut state = state_with(vec![host("a", "")]);
        let batch = [ProbeOutcome::down(), ProbeOutcome::down()];
        assert_eq!(state.apply_round(0, &batch, Local::now(), Instant::now()), 0);
        assert!(state.records[0].last_change.is_none());
    }

    #[test]
    fn test_round_chain_rearms_after_delivery() {
        let mut state = state_with(vec![host("a", "")]);
        let now = Instant::now();
        let (epoch, addresses) = state.take_due_round(now).unwrap();
        assert_eq!(epoch, 0);
        assert_eq!(addresses, vec!["a".to_string()]);
        // Nothing due while the round is in flight.
        assert!(state.take_due_round(now + Duration::from_secs(60)).is_none());

        state.apply_round(0, &[ProbeOutcome::down()], Local::now(), now);
        assert_eq!(state.next_round_at, Some(now + state.interval));
    }

    #[test]
    fn test_end_to_end_two_batches() {
        use crate::monitor::types::FLASH_DURATION;

        let mut state = state_with(vec![host("b.example", "B"), host("a.example", "A")]);
        assert_eq!(state.hosts[0].address, "a.example");

        let t0 = Local::now();
        let mono0 = Instant::now();
        let batch = [ProbeOutcome::up(Some(12.3)), ProbeOutcome::down()];
        assert_eq!(state.apply_round(0, &batch, t0, mono0), 0);
        assert_eq!(state.records[0].last_change, Some(t0));
        assert_eq!(state.records[1].last_change, Some(t0));
        assert!(state.records.iter().all(|r| r.flash_until.is_none()));

        let t1 = t0 + chrono::Duration::seconds(5);
        let mono1 = mono0 + Duration::from_secs(5);
        let batch = [ProbeOutcome::up(Some(12.0)), ProbeOutcome::up(Some(30.0))];
        assert_eq!(state.apply_round(0, &batch, t1, mono1), 1);
        assert_eq!(state.records[0].last_change, Some(t0));
        assert_eq!(state.records[0].flash_until, None);
        assert_eq!(state.records[1].last_change, Some(t1));
        assert_eq!(state.records[1].flash_until, Some(mono1 + FLASH_DURATION));
    }

    #[test]
    fn test_text_input_edits_at_cursor() {
        let mut input = TextInput::with_value("host");
        input.move_home();
        input.insert('a');
        assert_eq!(input.value, "ahost");
        input.move_end();
        input.backspace();
        assert_eq!(input.value, "ahos");
        input.move_left();
        input.delete();
        assert_eq!(input.value, "aho");
        assert_eq!(input.display_with_cursor(), "aho|");
    }
}
