//! Interactive menu loop over any reader/writer pair.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::display::format_tasks;
use crate::store::TaskStore;

const MENU: &str = "\
========================================
         TODO APPLICATION
========================================
1. Add new task
2. View all tasks
3. Update task
4. Delete task
5. Toggle task completion
6. Exit
========================================";

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Print `prompt` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Ask for a task id; prints the reason and yields `None` when it is not
    /// a number or not in the store.
    fn ask_existing_id(&mut self, store: &TaskStore, prompt: &str) -> io::Result<Option<u32>> {
        let Some(raw) = self.ask(prompt)? else {
            return Ok(None);
        };
        let Ok(id) = raw.parse::<u32>() else {
            self.say("Invalid task ID. Please enter a number.")?;
            return Ok(None);
        };
        if store.get(id).is_none() {
            self.say(&format!("Task with ID {id} not found."))?;
            return Ok(None);
        }
        Ok(Some(id))
    }

    fn add(&mut self, store: &mut TaskStore) -> io::Result<()> {
        self.say("\n--- Add New Task ---")?;
        let Some(title) = self.ask("Enter task title (1-200 characters): ")? else {
            return Ok(());
        };
        let description = self
            .ask("Enter task description (optional, press Enter to skip): ")?
            .unwrap_or_default();

        match store.add(&title, &description) {
            Ok(task) => {
                let id = task.id;
                self.say(&format!("Task added successfully with ID: {id}"))
            }
            Err(e) => self.say(&format!("Error adding task: {e}")),
        }
    }

    fn view(&mut self, store: &TaskStore) -> io::Result<()> {
        self.say("\n--- All Tasks ---")?;
        self.say(&format_tasks(&store.list()))
    }

    fn update(&mut self, store: &mut TaskStore) -> io::Result<()> {
        self.say("\n--- Update Task ---")?;
        let Some(id) = self.ask_existing_id(store, "Enter task ID to update: ")? else {
            return Ok(());
        };

        let Some(title) = self.ask("Enter new title (leave empty to keep current): ")? else {
            return Ok(());
        };
        let description = self
            .ask("Enter new description (leave empty to keep current): ")?
            .unwrap_or_default();

        let title = Some(title.as_str()).filter(|t| !t.is_empty());
        let description = Some(description.as_str()).filter(|d| !d.is_empty());
        match store.update(id, title, description) {
            Ok(_) => self.say(&format!("Task #{id} updated successfully.")),
            Err(e) => self.say(&format!("Error updating task: {e}")),
        }
    }

    fn delete(&mut self, store: &mut TaskStore) -> io::Result<()> {
        self.say("\n--- Delete Task ---")?;
        let Some(id) = self.ask_existing_id(store, "Enter task ID to delete: ")? else {
            return Ok(());
        };

        let title = store.get(id).map(|t| t.title.clone()).unwrap_or_default();
        let answer = self
            .ask(&format!(
                "Are you sure you want to delete task '#{id}' ({title})? (y/N): "
            ))?
            .unwrap_or_default()
            .to_lowercase();

        if answer == "y" || answer == "yes" {
            store.delete(id);
            self.say(&format!("Task #{id} deleted successfully."))
        } else {
            self.say("Deletion cancelled.")
        }
    }

    fn toggle(&mut self, store: &mut TaskStore) -> io::Result<()> {
        self.say("\n--- Toggle Task Completion ---")?;
        let Some(id) = self.ask_existing_id(store, "Enter task ID to toggle completion: ")? else {
            return Ok(());
        };
        match store.toggle(id) {
            Some(true) => self.say(&format!("Task #{id} marked as completed.")),
            Some(false) => self.say(&format!("Task #{id} marked as incomplete.")),
            None => self.say(&format!("Task with ID {id} not found.")),
        }
    }
}

/// Run the menu until the user picks Exit or input ends.
pub fn run<R: BufRead, W: Write>(store: &mut TaskStore, input: R, output: W) -> io::Result<()> {
    let mut console = Console { input, output };
    console.say("Welcome to the Todo Application!")?;

    loop {
        console.say(&format!("\n{MENU}"))?;
        let Some(choice) = console.ask("Select an option (1-6): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => console.add(store)?,
            "2" => console.view(store)?,
            "3" => console.update(store)?,
            "4" => console.delete(store)?,
            "5" => console.toggle(store)?,
            "6" => {
                console.say("Thank you for using the Todo Application. Goodbye!")?;
                break;
            }
            _ => console.say("Invalid option. Please select a number between 1 and 6.")?,
        }
    }

    info!(tasks = store.len(), "console session finished");
    Ok(())
}
