use anyhow::Result;

use super::ListedNote;

const HEADERS: [&str; 6] = ["DATE", "STATUS", "TYPE", "TITLE", "TAGS", "PATH"];

pub(super) fn format_json(notes: &[ListedNote], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(notes)?
    } else {
        serde_json::to_string(notes)?
    };
    Ok(json)
}

/// Left-aligned columns separated by two spaces; the last column is unpadded.
pub(super) fn format_table(notes: &[ListedNote]) -> String {
    let rows: Vec<[String; 6]> = notes
        .iter()
        .map(|note| {
            let r = &note.record;
            [
                r.date.clone(),
                r.status.clone(),
                r.kind.clone(),
                r.title.clone(),
                r.tags.join(","),
                note.path.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let last = cells.len() - 1;
    for (i, cell) in cells.iter().enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(cell);
            let pad = widths[i] - cell.chars().count() + 2;
            out.extend(std::iter::repeat_n(' ', pad));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::super::collect::note;
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_table_alignment() {
        let notes = vec![
            note("2024-06-15-standup.typ", "Standup", "2024-06-15", &["work", "team"]),
            note("idea.typ", "Idée", "2024-01-02", &[]),
        ];
        let table = format_table(&notes);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("DATE        STATUS  TYPE      TITLE    TAGS       PATH"));
        assert!(lines[1].ends_with("work,team  2024-06-15-standup.typ"));
        assert!(lines[2].contains("Idée     "));
        assert!(lines[2].ends_with("idea.typ"));
    }

    #[test]
    fn test_json_has_path_first() {
        let notes = vec![note("a.typ", "A", "2024-01-01", &["x"])];
        let json = format_json(&notes, false).unwrap();
        assert!(json.starts_with(r#"[{"path":"a.typ","title":"A","type":"document""#));

        let value: Value = serde_json::from_str(&format_json(&notes, true).unwrap()).unwrap();
        assert_eq!(value[0]["tags"][0], "x");
    }
}
