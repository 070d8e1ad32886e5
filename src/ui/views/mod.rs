pub mod reminder_list;

pub use reminder_list::ReminderListView;
