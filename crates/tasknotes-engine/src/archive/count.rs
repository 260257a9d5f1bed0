use crate::archive::context::completed_section;
use crate::editing::{EditError, Transform};
use crate::model::COUNT;

/// Bring the completed section's `count` in line with the task items it
/// actually holds, removing the section once it holds none.
pub fn refresh_completed_count(tr: &mut Transform) -> Result<(), EditError> {
    let Some(section) = completed_section(tr.doc()) else {
        return Ok(());
    };
    let (pos, range) = (section.pos, section.range());
    let declared = section.node.declared_count();
    let actual = section.node.task_item_count();

    if actual == 0 {
        log::debug!("completed section at {pos} is empty, removing it");
        tr.delete(range.start, range.end)?;
    } else if declared != actual || section.node.attr(COUNT).is_none() {
        let mut attrs = section.node.attrs.clone();
        attrs.insert(COUNT.to_string(), actual.into());
        tr.set_node_attrs(pos, attrs)?;
    }
    Ok(())
}
