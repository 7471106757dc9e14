//! Terminal output for command results.
//!
//! Messages are colored by level. Sections are printed in the same canonical
//! form the files use, so `webnotes matches > out.wn` produces a valid file.

use anyhow::Result;
use colored::Colorize;
use webnotesapp::commands::{CmdMessage, Duplicate, ListedSection, MessageLevel};
use webnotesapp::serializer::Serializer;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_sections(serializer: &Serializer, sections: &[ListedSection]) {
    print!("{}", render_sections(serializer, sections));
}

/// Sections separated by a blank line, like a document.
pub fn render_sections(serializer: &Serializer, sections: &[ListedSection]) -> String {
    sections
        .iter()
        .map(|listed| serializer.render_section(&listed.section))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_sections_json(sections: &[ListedSection]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(sections)?);
    Ok(())
}

pub fn print_duplicates(duplicates: &[Duplicate]) {
    for line in render_duplicates(duplicates) {
        println!("{}", line);
    }
}

/// One `a.wn,b.wn: id` line per duplicate.
pub fn render_duplicates(duplicates: &[Duplicate]) -> Vec<String> {
    duplicates
        .iter()
        .map(|d| {
            let paths: Vec<String> = d.paths.iter().map(|p| p.display().to_string()).collect();
            format!("{}: {}", paths.join(","), d.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use webnotesapp::model::Section;

    #[test]
    fn test_render_sections_as_document() {
        let mut note = Section::note("a note").unwrap();
        note.set_tags(&["b".to_string(), "a".to_string()]);
        let bookmark = Section::bookmark("https://example.com/").unwrap();
        let listed = vec![
            ListedSection {
                path: PathBuf::from("x.wn"),
                section: note,
            },
            ListedSection {
                path: PathBuf::from("y.wn"),
                section: bookmark,
            },
        ];
        assert_eq!(
            render_sections(&Serializer::default(), &listed),
            "# note://a_note\ntags: a,b\n\n# https://example.com/\n"
        );
    }

    #[test]
    fn test_render_duplicates() {
        let duplicates = vec![Duplicate {
            id: "https://x.com/".to_string(),
            paths: vec![PathBuf::from("a.wn"), PathBuf::from("sub/b.wn")],
        }];
        assert_eq!(render_duplicates(&duplicates), vec!["a.wn,sub/b.wn: https://x.com/"]);
    }
}
