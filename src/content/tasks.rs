//! Task board with status and priority filters.

use chrono::{Datelike, NaiveDate};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Delayed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::Completed, TaskStatus::Delayed];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendente",
            TaskStatus::Completed => "Concluída",
            TaskStatus::Delayed => "Atrasada",
        }
    }

    /// Plural label used by the filter.
    pub fn filter_label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendentes",
            TaskStatus::Completed => "Concluídas",
            TaskStatus::Delayed => "Atrasadas",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○",
            TaskStatus::Completed => "✔",
            TaskStatus::Delayed => "⚠",
        }
    }

    /// Completed tasks go back to pending; anything else becomes completed.
    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::Delayed => TaskStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Baixa",
            TaskPriority::Medium => "Média",
            TaskPriority::High => "Alta",
        }
    }
}

/// A filter value: everything, or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

/// Values typed into the "new task" form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// Date as typed, `YYYY-MM-DD`
    pub deadline: String,
    pub priority: TaskPriority,
}

impl TaskDraft {
    /// The parsed deadline, if the text is a valid date.
    pub fn parsed_deadline(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.deadline.trim(), "%Y-%m-%d").ok()
    }

    /// Whether the form can be submitted.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && self.parsed_deadline().is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    pub status_filter: Filter<TaskStatus>,
    pub priority_filter: Filter<TaskPriority>,
}

impl TaskBoard {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Create a task from `draft`. Returns the new id, or `None` if the
    /// title is blank or the deadline is not a date.
    pub fn add(&mut self, draft: &TaskDraft, now_millis: i64) -> Option<String> {
        let title = draft.title.trim();
        if title.is_empty() {
            return None;
        }
        let deadline = draft.parsed_deadline()?;

        let mut id = now_millis;
        while self.tasks.iter().any(|t| t.id == id.to_string()) {
            id += 1;
        }
        let id = id.to_string();

        self.tasks.push(Task {
            id: id.clone(),
            title: title.to_string(),
            description: draft.description.clone(),
            deadline,
            status: TaskStatus::Pending,
            priority: draft.priority,
        });
        debug!("Added task {}", id);
        Some(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn toggle(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.status = task.status.toggled();
        }
    }

    /// Tasks matching both filters, in creation order.
    pub fn filtered(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.status_filter.matches(&t.status))
            .filter(|t| self.priority_filter.matches(&t.priority))
            .collect()
    }
}

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Format a deadline as "5 de março".
pub fn format_deadline(date: NaiveDate) -> String {
    format!("{} de {}", date.day(), MONTHS_PT_BR[date.month0() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, deadline: &str, priority: TaskPriority) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            deadline: deadline.to_string(),
            priority,
        }
    }

    #[test]
    fn test_add_requires_title_and_date() {
        let mut board = TaskBoard::default();
        assert!(board.add(&draft("", "2024-05-01", TaskPriority::Low), 1).is_none());
        assert!(board.add(&draft("Gravar", "", TaskPriority::Low), 1).is_none());
        assert!(board.add(&draft("Gravar", "01/05/2024", TaskPriority::Low), 1).is_none());
        assert!(board.tasks().is_empty());

        let id = board.add(&draft("  Gravar  ", "2024-05-01", TaskPriority::High), 1).unwrap();
        let task = &board.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Gravar");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::High);
    }

    #[test]
    fn test_toggle_cycles_completed_and_pending() {
        let mut board = TaskBoard::default();
        let id = board.add(&draft("A", "2024-01-10", TaskPriority::Medium), 1).unwrap();
        board.toggle(&id);
        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
        board.toggle(&id);
        assert_eq!(board.tasks()[0].status, TaskStatus::Pending);
        assert_eq!(TaskStatus::Delayed.toggled(), TaskStatus::Completed);
    }

    #[test]
    fn test_filters_combine() {
        let mut board = TaskBoard::default();
        let a = board.add(&draft("A", "2024-01-10", TaskPriority::High), 1).unwrap();
        board.add(&draft("B", "2024-01-11", TaskPriority::Low), 2);
        board.add(&draft("C", "2024-01-12", TaskPriority::High), 3);
        board.toggle(&a);

        assert_eq!(board.filtered().len(), 3);

        board.priority_filter = Filter::Only(TaskPriority::High);
        assert_eq!(board.filtered().len(), 2);

        board.status_filter = Filter::Only(TaskStatus::Pending);
        let titles: Vec<&str> = board.filtered().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["C"]);
    }

    #[test]
    fn test_remove_task() {
        let mut board = TaskBoard::default();
        let id = board.add(&draft("A", "2024-01-10", TaskPriority::Low), 1).unwrap();
        assert!(board.remove(&id));
        assert!(!board.remove(&id));
    }

    #[test]
    fn test_ids_unique_in_same_millisecond() {
        let mut board = TaskBoard::default();
        let a = board.add(&draft("A", "2024-01-10", TaskPriority::Low), 7).unwrap();
        let b = board.add(&draft("B", "2024-01-10", TaskPriority::Low), 7).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_format_deadline_pt_br() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_deadline(date), "5 de março");
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_deadline(date), "31 de dezembro");
    }
}
