use pretty_assertions::assert_eq;
use tasknotes_engine::archive::{ArchiveOutcome, try_archive};
use tasknotes_engine::editing::{Cmd, Document, Transform};
use tasknotes_engine::invariants;
use tasknotes_engine::model::{
    CHECKED, Node, completed_section, doc, paragraph, task, task_item, task_list,
};
use tasknotes_engine::snapshot::outline;

fn toggle(tree: Node, at: usize) -> Node {
    let mut note = Document::new(tree).unwrap();
    note.apply(Cmd::ToggleTask { at }).unwrap();
    invariants::check(note.tree());
    note.into_tree()
}

#[test]
fn checking_the_only_task_creates_the_section() {
    let tree = doc(vec![task_list(vec![task(false, "Buy milk")])]);

    let result = toggle(tree, 1);

    insta::assert_snapshot!(outline(&result), @r#"
    doc
      completedTasksSection expanded=true count=1
        taskList
          taskItem [x] "Buy milk"
    "#);
}

#[test]
fn checking_a_task_appends_it_to_the_existing_section() {
    let tree = doc(vec![
        task_list(vec![task(false, "A"), task(false, "B")]),
        completed_section(true, 1, task_list(vec![task(true, "C")])),
    ]);

    let result = toggle(tree, 1);

    insta::assert_snapshot!(outline(&result), @r#"
    doc
      taskList
        taskItem [ ] "B"
      completedTasksSection expanded=true count=2
        taskList
          taskItem [x] "C"
          taskItem [x] "A"
    "#);
}

#[test]
fn unchecking_the_last_archived_task_without_active_list() {
    let tree = doc(vec![completed_section(
        true,
        1,
        task_list(vec![task(true, "C")]),
    )]);

    // section 0, list 1, C 2
    let result = toggle(tree, 2);

    assert_eq!(result, doc(vec![task_list(vec![task(false, "C")])]));
}

#[test]
fn unchecking_an_archived_task_appends_it_to_the_active_list() {
    let tree = doc(vec![
        task_list(vec![task(false, "A")]),
        completed_section(true, 2, task_list(vec![task(true, "B"), task(true, "C")])),
    ]);

    // list 0..7, section 7, list 8, B 9
    let result = toggle(tree, 9);

    insta::assert_snapshot!(outline(&result), @r#"
    doc
      taskList
        taskItem [ ] "A"
        taskItem [ ] "B"
      completedTasksSection expanded=true count=1
        taskList
          taskItem [x] "C"
    "#);
}

#[test]
fn unchecking_the_last_archived_task_with_active_list() {
    let tree = doc(vec![
        paragraph("Today"),
        task_list(vec![task(false, "A")]),
        completed_section(false, 1, task_list(vec![task(true, "C")])),
    ]);

    // paragraph 0..7, list 7..14, section 14, list 15, C 16
    let result = toggle(tree, 16);

    assert_eq!(
        result,
        doc(vec![
            paragraph("Today"),
            task_list(vec![task(false, "A"), task(false, "C")]),
        ])
    );
}

#[test]
fn two_flips_in_one_edit_both_apply() {
    let old = doc(vec![
        task_list(vec![task(false, "A"), task(false, "X")]),
        completed_section(true, 2, task_list(vec![task(true, "B"), task(true, "C")])),
    ]);

    // A at 1, B at 14
    let result = archived(flip_all(&old, &[(1, true), (14, false)]));

    insta::assert_snapshot!(outline(&result), @r#"
    doc
      taskList
        taskItem [ ] "X"
        taskItem [ ] "B"
      completedTasksSection expanded=true count=2
        taskList
          taskItem [x] "C"
          taskItem [x] "A"
    "#);
}

/// Set `checked` on several task items in a single edit and archive it.
fn flip_all(old: &Node, flips: &[(usize, bool)]) -> ArchiveOutcome {
    let mut tr = Transform::new(old.clone());
    for &(pos, checked) in flips {
        let mut attrs = tr.doc().node_at(pos).unwrap().attrs.clone();
        attrs.insert(CHECKED.to_string(), checked.into());
        tr.set_node_attrs(pos, attrs).unwrap();
    }
    let (new, steps) = tr.into_parts();
    try_archive(old, &new, &steps)
}

fn archived(outcome: ArchiveOutcome) -> Node {
    let ArchiveOutcome::Replaced(result) = outcome else {
        panic!("expected the edit to be archived");
    };
    invariants::check(&result);
    result
}

#[test]
fn reopening_two_archived_tasks_in_one_edit() {
    let old = doc(vec![
        task_list(vec![task(false, "A")]),
        completed_section(true, 2, task_list(vec![task(true, "Bee"), task(true, "Cat")])),
    ]);

    // list 0..7, section 7, list 8, Bee 9, Cat 16
    let result = archived(flip_all(&old, &[(9, false), (16, false)]));

    assert_eq!(
        result,
        doc(vec![task_list(vec![
            task(false, "A"),
            task(false, "Cat"),
            task(false, "Bee"),
        ])])
    );
}

#[test]
fn completing_two_tasks_listed_after_the_section() {
    let old = doc(vec![
        completed_section(true, 1, task_list(vec![task(true, "C")])),
        task_list(vec![task(false, "Aaa"), task(false, "Bbb")]),
    ]);

    // section 0..9, list 9, Aaa 10, Bbb 17
    let result = archived(flip_all(&old, &[(10, true), (17, true)]));

    assert_eq!(
        result,
        doc(vec![completed_section(
            true,
            3,
            task_list(vec![task(true, "C"), task(true, "Bbb"), task(true, "Aaa")]),
        )])
    );
}

#[test]
fn skipped_reopen_does_not_block_other_moves() {
    // A was never archived, so unchecking it moves nothing
    let old = doc(vec![task_list(vec![task(true, "A"), task(false, "B")])]);

    let outcome = flip_all(&old, &[(1, false), (6, true)]);

    assert_eq!(
        outcome,
        ArchiveOutcome::Replaced(doc(vec![
            task_list(vec![task(false, "A")]),
            completed_section(true, 1, task_list(vec![task(true, "B")])),
        ]))
    );
}

#[test]
fn failed_move_does_not_block_other_moves() {
    // the section sits inside P, so P cannot be moved into it
    let p = task_item(
        false,
        vec![
            paragraph("P"),
            completed_section(true, 1, task_list(vec![task(true, "C")])),
        ],
    );
    let old = doc(vec![task_list(vec![task(false, "X"), p])]);

    // X at 1, P at 6
    let outcome = flip_all(&old, &[(1, true), (6, true)]);

    assert_eq!(
        outcome,
        ArchiveOutcome::Replaced(doc(vec![task_list(vec![task_item(
            true,
            vec![
                paragraph("P"),
                completed_section(true, 2, task_list(vec![task(true, "C"), task(true, "X")])),
            ],
        )])]))
    );
}

#[test]
fn text_edit_is_left_alone() {
    let old = doc(vec![task_list(vec![task(false, "A")])]);
    let mut note = Document::new(old.clone()).unwrap();

    let patch = note
        .apply(Cmd::InsertNode {
            at: 7,
            node: paragraph("footnote"),
        })
        .unwrap();

    assert!(!patch.replaced);
    assert_eq!(
        note.tree(),
        &doc(vec![task_list(vec![task(false, "A")]), paragraph("footnote")])
    );
}

#[test]
fn checking_a_parent_moves_its_subtasks_along() {
    let parent = task_item(
        false,
        vec![
            paragraph("Party"),
            task_list(vec![task(true, "Cake"), task(false, "Balloons")]),
        ],
    );
    let tree = doc(vec![task_list(vec![parent, task(false, "Other")])]);

    let result = toggle(tree, 1);

    insta::assert_snapshot!(outline(&result), @r#"
    doc
      taskList
        taskItem [ ] "Other"
      completedTasksSection expanded=true count=3
        taskList
          taskItem [x] "Party"
            taskList
              taskItem [x] "Cake"
              taskItem [ ] "Balloons"
    "#);
}

#[test]
fn section_toggle_is_not_an_archive_event() {
    let tree = doc(vec![completed_section(
        true,
        1,
        task_list(vec![task(true, "C")]),
    )]);
    let mut note = Document::new(tree).unwrap();

    let patch = note.apply(Cmd::ToggleSectionExpanded).unwrap();

    assert!(patch.changed());
    assert!(!patch.replaced);
    assert!(!note.tree().child(0).unwrap().expanded());
}

/// Toggle tasks round-robin and check every invariant after each edit.
#[test]
fn invariants_hold_across_many_toggles() {
    let tree = doc(vec![
        paragraph("Week"),
        task_list(vec![
            task(false, "one"),
            task(true, "two"),
            task_item(
                false,
                vec![paragraph("three"), task_list(vec![task(false, "three.a")])],
            ),
        ]),
        paragraph("Later"),
        task_list(vec![task(false, "four"), task(false, "five")]),
    ]);
    let mut note = Document::new(tree).unwrap();
    let mut expected_texts = texts(&note);
    expected_texts.sort();

    for round in 0..40 {
        let tasks = note.tasks();
        let target = &tasks[(round * 7) % tasks.len()];
        note.apply(Cmd::ToggleTask { at: target.pos }).unwrap();

        invariants::check(note.tree());
        let mut now = texts(&note);
        now.sort();
        assert_eq!(now, expected_texts, "tasks lost or duplicated in round {round}");

        // a checked task always ends up archived, an unchecked one never
        let after = note
            .tasks()
            .into_iter()
            .find(|t| t.text == target.text)
            .unwrap();
        assert_eq!(after.checked, !target.checked);
        assert_eq!(after.checked, after.archived, "round {round}: {after:?}");
    }
}

fn texts(note: &Document) -> Vec<String> {
    note.tasks().into_iter().map(|t| t.text).collect()
}

#[test]
fn editor_json_round_trips_through_an_archive() {
    let json = r#"{
      "type": "doc",
      "content": [
        {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Errands"}]},
        {"type": "taskList", "content": [
          {"type": "taskItem", "attrs": {"checked": false}, "content": [
            {"type": "paragraph", "content": [
              {"type": "text", "text": "Post "},
              {"type": "text", "marks": [{"type": "bold"}], "text": "parcel"}
            ]}
          ]},
          {"type": "taskItem", "attrs": {"checked": false}, "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "Bank"}]}
          ]}
        ]},
        {"type": "mention", "attrs": {"id": "sam"}}
      ]
    }"#;
    let mut note = Document::from_json(json).unwrap();
    let parcel = note.tree().node_at(10).unwrap().clone();
    assert!(parcel.is_task_item());

    // heading 0..9, list 9, first item 10
    let patch = note.apply(Cmd::ToggleTask { at: 10 }).unwrap();
    assert!(patch.replaced);

    let saved: serde_json::Value = serde_json::from_str(&note.to_json().unwrap()).unwrap();
    assert_eq!(saved["content"][0]["attrs"]["level"], 2);
    assert_eq!(saved["content"][2]["type"], "mention");
    assert_eq!(saved["content"][3]["type"], "completedTasksSection");
    assert_eq!(saved["content"][3]["attrs"]["count"], 1);

    let archived: Node =
        serde_json::from_value(saved["content"][3]["content"][0]["content"][0].clone()).unwrap();
    let mut expected = parcel;
    expected.attrs.insert(CHECKED.to_string(), true.into());
    assert_eq!(archived, expected);
}
