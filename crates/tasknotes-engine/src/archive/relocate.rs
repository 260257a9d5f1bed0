use crate::archive::ArchiveOptions;
use crate::archive::context::{
    completed_section, in_section, last_active_list_before, parent_list, removal_range,
    section_list, task_item_at,
};
use crate::editing::{EditError, EditPlan, Transform};
use crate::model;

/// Move the checked task item at `pos` to the end of the completed section,
/// creating the section at the end of the document if there is none.
///
/// Returns whether the tree changed. The item subtree is moved as is.
pub fn move_to_completed(
    tr: &mut Transform,
    pos: usize,
    options: &ArchiveOptions,
) -> Result<bool, EditError> {
    let doc = tr.doc();
    let Some(item) = task_item_at(doc, pos) else {
        log::debug!("no task item at {pos}, skipping");
        return Ok(false);
    };
    let section = completed_section(doc);
    if section.as_ref().is_some_and(|s| in_section(s, pos)) {
        log::debug!("task at {pos} is already inside the completed section");
        return Ok(false);
    }

    let mut plan = EditPlan::new();
    plan.delete(removal_range(doc, pos, item));
    match section {
        Some(section) => {
            let Some(list) = section_list(&section) else {
                log::debug!("completed section at {} has no task list", section.pos);
                return Ok(false);
            };
            plan.insert(list.content_end(), item.clone());
        }
        None => {
            let new_section = model::completed_section(
                options.expand_new_section,
                1,
                model::task_list(vec![item.clone()]),
            );
            plan.insert(doc.content_size(), new_section);
        }
    }

    plan.apply(tr)?;
    log::debug!("moved completed task from {pos} into the completed section");
    Ok(true)
}

/// Move the unchecked task item at `pos` out of the completed section and
/// onto the end of the last active task list before it, creating a list
/// when there is none.
///
/// Returns whether the tree changed. Items outside the completed section
/// are left where they are.
pub fn move_to_active(tr: &mut Transform, pos: usize) -> Result<bool, EditError> {
    let doc = tr.doc();
    let Some(item) = task_item_at(doc, pos) else {
        log::debug!("no task item at {pos}, skipping");
        return Ok(false);
    };
    let Some(section) = completed_section(doc).filter(|s| in_section(s, pos)) else {
        log::debug!("reopened task at {pos} is not archived, leaving it");
        return Ok(false);
    };

    // Only a direct child of the section's list can empty the section; a
    // nested sub-task leaves its parent task behind.
    let section_would_be_empty = parent_list(doc, pos).is_some_and(|parent| {
        parent.would_be_empty && parent.list.pos == section.pos + 1
    });

    let mut plan = EditPlan::new();
    if section_would_be_empty {
        plan.delete(section.range());
    } else {
        plan.delete(removal_range(doc, pos, item));
    }
    match last_active_list_before(doc, section.pos) {
        Some(list) => plan.insert(list.content_end(), item.clone()),
        None => plan.insert(section.pos, model::task_list(vec![item.clone()])),
    };

    plan.apply(tr)?;
    log::debug!("moved reopened task from {pos} back to the active tasks");
    Ok(true)
}
