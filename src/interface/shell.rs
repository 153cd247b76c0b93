use rustyline::Editor;

use crate::interface::arguments::{parse_command, ShellCommand};
use crate::util::errors::InputError;


pub struct InteractiveShell {
    prompt: String,
    editor: Editor<()>,
}


impl InteractiveShell {
    pub fn new(prompt: Option<&str>) -> InteractiveShell {
        let default_prompt = ">>> ";
        return InteractiveShell {
            prompt: String::from( match prompt { Some(x) => x, None => default_prompt } ),
            editor: Editor::<()>::new(),
        }
    }

    pub fn empty_line(&self) {
        println!();
    }

    pub fn output(&self, output: &str) {
        println!("{}", output);
    }

    pub fn input(&mut self, prompt: &str) -> Result<String, InputError> {
        let line = self.editor.readline(prompt)?;
        let line = String::from(line.trim());
        if !line.is_empty() {
            self.editor.add_history_entry(line.as_str());
        }
        return Ok(line);
    }

    /// `Ok(None)` for a blank line.
    pub fn get_command(&mut self) -> Result<Option<ShellCommand>, InputError> {
        let prompt = self.prompt.clone();
        return parse_command(&self.input(&prompt)?);
    }
}
