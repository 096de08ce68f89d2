use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::{FileSelector, SelectionError};

#[cfg(feature = "colorized_output")]
use console::style;

/// Terminal selector: prints the file table and reads answers line by line.
///
/// A preset index or `assume_yes` skips the matching question.
#[derive(Debug)]
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
    preset_index: Option<usize>,
    assume_yes: bool,
}

impl PromptSelector<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Selector bound to stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    /// Selector reading from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            preset_index: None,
            assume_yes: false,
        }
    }

    /// Answer the file-number question with `index` when set.
    pub fn with_preset_index(mut self, index: Option<usize>) -> Self {
        self.preset_index = index;
        self
    }

    /// Confirm without asking.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask(&mut self, question: &str) -> Result<String, SelectionError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SelectionError::NoAnswer);
        }
        Ok(line.trim().to_string())
    }

    fn print_table(&mut self, files: &[PathBuf]) -> Result<(), SelectionError> {
        let width = files.len().saturating_sub(1).to_string().len().max(1);
        writeln!(self.output, "{:>width$}  {}", "", heading("filename"))?;
        for (index, path) in files.iter().enumerate() {
            writeln!(self.output, "{:>width$}  {}", index, display_name(path))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> FileSelector for PromptSelector<R, W> {
    fn choose(&mut self, files: &[PathBuf]) -> Result<usize, SelectionError> {
        let index = match self.preset_index {
            Some(index) => index,
            None => {
                self.print_table(files)?;
                let answer = self.ask("Select the file number: ")?;
                answer
                    .parse()
                    .map_err(|_| SelectionError::InvalidIndex(answer.clone()))?
            }
        };
        if index >= files.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: files.len(),
            });
        }
        Ok(index)
    }

    fn confirm(&mut self, file: &Path) -> Result<bool, SelectionError> {
        if self.assume_yes {
            return Ok(true);
        }
        let question = format!("You chose '{}'. Is it right? (y/n) ", display_name(file));
        Ok(self.ask(&question)? == "y")
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(feature = "colorized_output")]
fn heading(text: &str) -> String {
    style(text).bold().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn heading(text: &str) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::select_file;
    use std::io::Cursor;

    fn files() -> Vec<PathBuf> {
        vec![
            PathBuf::from("/data/run_01.csv"),
            PathBuf::from("/data/run_02.csv"),
        ]
    }

    fn selector(answers: &str) -> PromptSelector<Cursor<Vec<u8>>, Vec<u8>> {
        PromptSelector::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_choose_and_confirm() {
        let mut prompt = selector("1\ny\n");
        let chosen = select_file(&mut prompt, &files()).unwrap();
        assert_eq!(chosen, Some(PathBuf::from("/data/run_02.csv")));

        let (_, output) = prompt.into_inner();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("run_01.csv"));
        assert!(output.contains("Select the file number: "));
        assert!(output.contains("You chose 'run_02.csv'"));
    }

    #[test]
    fn test_answer_is_trimmed() {
        let mut prompt = selector("  0 \r\n y \n");
        assert_eq!(
            select_file(&mut prompt, &files()).unwrap(),
            Some(PathBuf::from("/data/run_01.csv"))
        );
    }

    #[test]
    fn test_anything_but_y_declines() {
        for answer in ["n", "Y", "yes", ""] {
            let mut prompt = selector(&format!("0\n{answer}\n"));
            assert_eq!(select_file(&mut prompt, &files()).unwrap(), None, "{answer:?}");
        }
    }

    #[test]
    fn test_non_numeric_index() {
        let mut prompt = selector("first\n");
        assert!(matches!(
            prompt.choose(&files()),
            Err(SelectionError::InvalidIndex(answer)) if answer == "first"
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut prompt = selector("7\n");
        assert!(matches!(
            prompt.choose(&files()),
            Err(SelectionError::IndexOutOfRange { index: 7, len: 2 })
        ));
    }

    #[test]
    fn test_preset_answers_skip_questions() {
        let mut prompt = selector("").with_preset_index(Some(1)).with_assume_yes(true);
        assert_eq!(
            select_file(&mut prompt, &files()).unwrap(),
            Some(PathBuf::from("/data/run_02.csv"))
        );
        let (_, output) = prompt.into_inner();
        assert!(output.is_empty());

        let mut prompt = selector("n\n").with_preset_index(Some(0));
        assert_eq!(select_file(&mut prompt, &files()).unwrap(), None);

        let mut prompt = selector("").with_preset_index(Some(5));
        assert!(matches!(
            prompt.choose(&files()),
            Err(SelectionError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_closed_input() {
        let mut prompt = selector("");
        assert!(matches!(prompt.choose(&files()), Err(SelectionError::NoAnswer)));
    }
}
