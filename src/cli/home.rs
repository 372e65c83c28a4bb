use std::cell::Cell as Flag;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::date;
use crate::ledger::{Ledger, Snapshot};
use crate::models::{Category, NewTransaction, TransactionType};
use crate::tui::{self, money_span, View, ViewAction, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Amount,
    Description,
    Category,
    Type,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Amount => Field::Description,
            Field::Description => Field::Category,
            Field::Category => Field::Type,
            Field::Type => Field::Amount,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Amount => Field::Type,
            Field::Description => Field::Amount,
            Field::Category => Field::Description,
            Field::Type => Field::Category,
        }
    }
}

struct AddForm {
    field: Field,
    amount: String,
    description: String,
    category: usize,
    kind: TransactionType,
}

impl AddForm {
    fn new() -> Self {
        Self {
            field: Field::Amount,
            amount: String::new(),
            description: String::new(),
            category: 0,
            kind: TransactionType::Expense,
        }
    }

    fn parse_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
    }
}

enum Mode {
    Browse,
    Add(AddForm),
    ConfirmDelete(i64),
}

/// Home screen: monthly summary card over the recent transaction list.
pub struct HomeScreen {
    ledger: Ledger,
    mode: Mode,
    selected: usize,
    table_state: TableState,
    status_message: Option<String>,
    changed: Rc<Flag<bool>>,
}

impl HomeScreen {
    pub fn new(mut ledger: Ledger) -> Self {
        let changed = Rc::new(Flag::new(false));
        let flag = changed.clone();
        ledger.subscribe(move |_| flag.set(true));
        Self {
            ledger,
            mode: Mode::Browse,
            selected: 0,
            table_state: TableState::default(),
            status_message: None,
            changed,
        }
    }

    fn snapshot(&self) -> &Snapshot {
        self.ledger.snapshot()
    }

    /// Keep the cursor on a real row after the list changed underneath it.
    fn sync_selection(&mut self) {
        if self.changed.replace(false) {
            let len = self.snapshot().transactions.len();
            self.selected = self.selected.min(len.saturating_sub(1));
        }
    }

    fn refresh(&mut self) {
        match self.ledger.get_data() {
            Ok(()) => self.status_message = Some("Refreshed.".to_string()),
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
        self.sync_selection();
    }

    fn delete(&mut self, id: i64) {
        match self.ledger.delete_transaction(id) {
            Ok(true) => self.status_message = Some(format!("Deleted #{id}.")),
            Ok(false) => self.status_message = Some(format!("#{id} was already gone.")),
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
        self.sync_selection();
    }

    fn submit(&mut self, form: AddForm) -> Mode {
        let Some(amount) = form.parse_amount() else {
            self.status_message = Some("Enter an amount greater than zero.".to_string());
            return Mode::Add(form);
        };
        let category_id = self.snapshot().categories.get(form.category).map(|c| c.id);
        let txn = NewTransaction {
            category_id,
            amount,
            date: self.ledger.now().timestamp(),
            description: form.description.trim().to_string(),
            kind: form.kind,
        };
        let result = self.ledger.insert_transaction(txn);
        self.sync_selection();
        match result {
            Ok(id) => {
                self.status_message = Some(format!("Added #{id}."));
                self.selected = 0;
                Mode::Browse
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                Mode::Add(form)
            }
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> (Mode, ViewAction) {
        let len = self.snapshot().transactions.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return (Mode::Browse, ViewAction::Close),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('a') => {
                self.status_message = None;
                return (Mode::Add(AddForm::new()), ViewAction::Continue);
            }
            KeyCode::Char('d') => {
                if let Some(txn) = self.snapshot().transactions.get(self.selected) {
                    return (Mode::ConfirmDelete(txn.id), ViewAction::Continue);
                }
            }
            _ => {}
        }
        (Mode::Browse, ViewAction::Continue)
    }

    fn handle_form_key(&mut self, mut form: AddForm, code: KeyCode) -> Mode {
        let category_count = self.snapshot().categories.len();
        match code {
            KeyCode::Esc => {
                self.status_message = None;
                return Mode::Browse;
            }
            KeyCode::Enter => return self.submit(form),
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Left | KeyCode::Right if form.field == Field::Type => {
                form.kind = form.kind.toggled();
            }
            KeyCode::Left if form.field == Field::Category && category_count > 0 => {
                form.category = (form.category + category_count - 1) % category_count;
            }
            KeyCode::Right if form.field == Field::Category && category_count > 0 => {
                form.category = (form.category + 1) % category_count;
            }
            KeyCode::Backspace => match form.field {
                Field::Amount => {
                    form.amount.pop();
                }
                Field::Description => {
                    form.description.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) => match form.field {
                Field::Amount if c.is_ascii_digit() || c == '.' => form.amount.push(c),
                Field::Description => form.description.push(c),
                Field::Type if c == ' ' => form.kind = form.kind.toggled(),
                _ => {}
            },
            _ => {}
        }
        Mode::Add(form)
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.snapshot();
        let totals = snapshot.totals;
        let [text_area, chart_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

        let lines = vec![
            Line::from(Span::styled(
                format!(" Summary for {}", snapshot.period),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::raw(" Income           "), money_span(totals.total_income)]),
            Line::from(vec![Span::raw(" Total Expenses   "), money_span(totals.total_expenses)]),
            Line::from(vec![Span::raw(" Savings          "), money_span(totals.savings())]),
        ];
        frame.render_widget(Paragraph::new(lines), text_area);

        let bars = [
            Bar::default()
                .label(Line::from("Income"))
                .value(totals.total_income.max(0.0).round() as u64)
                .text_value(String::new())
                .style(tui::AMOUNT_POS_STYLE),
            Bar::default()
                .label(Line::from("Expenses"))
                .value(totals.total_expenses.max(0.0).round() as u64)
                .text_value(String::new())
                .style(tui::AMOUNT_NEG_STYLE),
        ];
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::LEFT).border_style(FOOTER_STYLE))
            .direction(ratatui::layout::Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, chart_area);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let snapshot = self.ledger.snapshot();
        let rows: Vec<Row> = snapshot
            .transactions
            .iter()
            .map(|txn| {
                Row::new(vec![
                    Cell::from(txn.id.to_string()),
                    Cell::from(date(txn.date)),
                    Cell::from(self.ledger.category_name(txn.category_id).to_string()),
                    Cell::from(txn.description.clone()),
                    Cell::from(money_span(txn.signed_amount())),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Fill(1),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["ID", "Date", "Category", "Description", "Amount"])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);

        let selected = if snapshot.transactions.is_empty() { None } else { Some(self.selected) };
        self.table_state.select(selected);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_form(&self, frame: &mut Frame, form: &AddForm) {
        let area = frame.area();
        let width = area.width.min(60);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(8) / 2,
            width,
            height: 8.min(area.height),
        };
        let categories: &[Category] = &self.snapshot().categories;
        let category = categories
            .get(form.category)
            .map(|c| c.name.as_str())
            .unwrap_or(crate::ledger::UNCATEGORIZED);

        let field_line = |field: Field, label: &str, value: String| {
            let style = if form.field == field { SELECTED_STYLE } else { Style::default() };
            Line::from(vec![Span::raw(format!(" {label:<13}")), Span::styled(value, style)])
        };
        let cursor = |field: Field| if form.field == field { "\u{2588}" } else { "" };

        let lines = vec![
            field_line(Field::Amount, "Amount", format!("{}{}", form.amount, cursor(Field::Amount))),
            field_line(
                Field::Description,
                "Description",
                format!("{}{}", form.description, cursor(Field::Description)),
            ),
            field_line(Field::Category, "Category", format!("\u{2039} {category} \u{203a}")),
            field_line(Field::Type, "Type", format!("\u{2039} {} \u{203a}", form.kind)),
            Line::from(""),
            Line::from(Span::styled(
                " Tab:next field  \u{2190}/\u{2192}:change  Enter:save  Esc:cancel",
                FOOTER_STYLE,
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New transaction ")
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

impl View for HomeScreen {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, sep1, summary_area, sep2, list_area, status_area, keys_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(Paragraph::new(" Budget Buddy").style(HEADER_STYLE), header_area);
        let sep_line = "\u{2501}".repeat(area.width as usize);
        let sep = Paragraph::new(sep_line.as_str()).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(sep.clone(), sep1);
        frame.render_widget(sep, sep2);

        self.draw_summary(frame, summary_area);
        if self.snapshot().transactions.is_empty() {
            frame.render_widget(
                Paragraph::new(" No transactions yet. Press a to add one.").style(FOOTER_STYLE),
                list_area,
            );
        } else {
            self.draw_list(frame, list_area);
        }

        let status = self.status_message.clone().unwrap_or_else(|| {
            let snapshot = self.snapshot();
            let this_month = snapshot
                .transactions
                .iter()
                .filter(|t| snapshot.window.contains(t.date))
                .count();
            format!(
                " {} recent transactions, {this_month} this month",
                snapshot.transactions.len()
            )
        });
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        let keys = match &self.mode {
            Mode::ConfirmDelete(id) => format!(" Delete #{id}? y:confirm  any other key:cancel"),
            _ => " \u{2191}/\u{2193}:select  a:add  d:delete  r:refresh  q:quit".to_string(),
        };
        frame.render_widget(Paragraph::new(keys).style(FOOTER_STYLE), keys_area);

        if let Mode::Add(form) = &self.mode {
            self.draw_form(frame, form);
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        let (next, action) = match mode {
            Mode::Browse => self.handle_browse_key(code),
            Mode::Add(form) => (self.handle_form_key(form, code), ViewAction::Continue),
            Mode::ConfirmDelete(id) => {
                if code == KeyCode::Char('y') {
                    self.delete(id);
                } else {
                    self.status_message = None;
                }
                (Mode::Browse, ViewAction::Continue)
            }
        };
        self.mode = next;
        action
    }
}

pub fn run() -> Result<()> {
    let ledger = open_ledger()?;
    let mut screen = HomeScreen::new(ledger);
    tui::run_view(&mut screen)
}
