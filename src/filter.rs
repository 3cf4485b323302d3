use crate::menu::{MenuDocument, Section};

/// Reduce a menu document to the sections and items matching `query`.
///
/// The query is trimmed and case-folded; an item matches when the folded
/// concatenation of its name, description, and section title contains the
/// query as a substring. An empty query matches everything. Section and
/// item order is preserved; sections left with no matching items are
/// dropped rather than rendered empty.
pub fn filter_menu(doc: &MenuDocument, query: &str) -> Vec<Section> {
    let q = query.trim().to_lowercase();

    doc.sections
        .iter()
        .filter_map(|section| {
            let items: Vec<_> = section
                .items
                .iter()
                .filter(|item| {
                    if q.is_empty() {
                        return true;
                    }
                    let hay = format!(
                        "{} {} {}",
                        item.name,
                        item.desc.as_deref().unwrap_or(""),
                        section.title
                    )
                    .to_lowercase();
                    hay.contains(&q)
                })
                .cloned()
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(Section {
                    title: section.title.clone(),
                    hint: section.hint.clone(),
                    items,
                })
            }
        })
        .collect()
}
