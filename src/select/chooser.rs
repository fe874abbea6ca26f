use std::io::{BufRead, Write};

use anyhow::Context as _;

use crate::{
    foundation::error::{StagehandError, StagehandResult},
    module::catalog::SceneCatalog,
    scene::TypeDef,
    select::resolver::Chooser,
};

pub const CHOOSE_NUMBER_MESSAGE: &str = "\nChoose number corresponding to desired scene/arguments.\n(Use comma separated list for multiple entries)\nChoice(s): ";
pub const INVALID_NUMBER_MESSAGE: &str =
    "Fine then, if you don't want to give a valid number I'll just quit";

/// Numbered menu over the catalog, answered with one line of input.
#[derive(Debug)]
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Chooser for PromptChooser<R, W> {
    fn choose(&mut self, catalog: &SceneCatalog) -> StagehandResult<Vec<TypeDef>> {
        prompt_user_for_choice(catalog, &mut self.input, &mut self.output)
    }
}

/// Print `"<n>: <name>"` for every scene (1-based, sorted), read one line and map it
/// back to scene types in the order given. Repeats are kept.
pub fn prompt_user_for_choice(
    catalog: &SceneCatalog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> StagehandResult<Vec<TypeDef>> {
    for (n, name) in catalog.names().enumerate() {
        writeln!(output, "{}: {name}", n + 1).context("write scene menu")?;
    }
    write!(output, "{CHOOSE_NUMBER_MESSAGE}").context("write scene prompt")?;
    output.flush().context("flush scene prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("read scene choice")?;

    let types: Vec<&TypeDef> = catalog.types().collect();
    let picks = parse_choices(&line, types.len())?;
    Ok(picks.into_iter().map(|i| types[i].clone()).collect())
}

/// Parse `"1, 3,1"` into zero-based indices `[0, 2, 0]` for a menu of `count` entries.
pub fn parse_choices(line: &str, count: usize) -> StagehandResult<Vec<usize>> {
    line.trim()
        .split(',')
        .map(|tok| {
            let tok = tok.trim();
            let n: usize = tok.parse().map_err(|_| {
                StagehandError::invalid_selection(format!("'{tok}' is not a number"))
            })?;
            if n == 0 || n > count {
                return Err(StagehandError::invalid_selection(format!(
                    "{n} is not between 1 and {count}"
                )));
            }
            Ok(n - 1)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/select/chooser.rs"]
mod tests;
