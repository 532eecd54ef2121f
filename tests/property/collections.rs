//! Property-based tests for the collection managers.
//!
//! Uses proptest to verify:
//! 1. Under any sequence of creates and deletes, task ids stay unique and
//!    strictly increasing in list order.
//! 2. Every create is assigned the last element's id + 1 (or 1 when empty).
//! 3. Whitespace-only descriptions and names are always rejected and never
//!    mutate the collection.
//! 4. Updates never change a task's id or the collection's order.

use proptest::prelude::*;
use todo_proto::label::{LabelDraft, LabelId};
use todo_proto::task::{TaskDraft, TaskId};
use todo_server::error::CollectionError;
use todo_server::labels::LabelManager;
use todo_server::tasks::TaskManager;

/// A single mutation against the task collection.
#[derive(Debug, Clone)]
enum Op {
    Create(String),
    /// Delete the element at `index % len` (no-op on an empty collection).
    Delete(usize),
    /// Delete an id that may not exist.
    DeleteRaw(u32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[a-z]{1,12}".prop_map(Op::Create),
        2 => any::<usize>().prop_map(Op::Delete),
        1 => (1u32..64).prop_map(Op::DeleteRaw),
    ]
}

fn ids(manager: &TaskManager) -> Vec<u32> {
    manager.list_all().iter().map(|t| t.task_id.get()).collect()
}

proptest! {
    #[test]
    fn ids_unique_and_increasing(ops in prop::collection::vec(arb_op(), 0..64)) {
        let manager = TaskManager::default();
        for op in ops {
            let before = ids(&manager);
            match op {
                Op::Create(description) => {
                    let expected = before.last().map_or(1, |last| last + 1);
                    let task = manager.create(TaskDraft::new(description)).unwrap();
                    prop_assert_eq!(task.task_id.get(), expected);
                }
                Op::Delete(index) => {
                    if !before.is_empty() {
                        let id = before[index % before.len()];
                        prop_assert!(manager.delete_by_id(TaskId::new(id)).is_ok());
                    }
                }
                Op::DeleteRaw(id) => {
                    let result = manager.delete_by_id(TaskId::new(id));
                    prop_assert_eq!(result.is_ok(), before.contains(&id));
                }
            }
            let after = ids(&manager);
            prop_assert!(after.windows(2).all(|w| w[0] < w[1]), "ids not increasing: {:?}", after);
        }
    }

    #[test]
    fn blank_descriptions_never_mutate(
        seed in 0usize..5,
        blank in "[ \t\n\r]{0,8}",
    ) {
        let manager = TaskManager::default();
        for i in 0..seed {
            manager.create(TaskDraft::new(format!("t{i}"))).unwrap();
        }
        let before = manager.list_all();

        prop_assert!(matches!(
            manager.create(TaskDraft::new(blank.clone())),
            Err(CollectionError::Validation(_))
        ));
        if seed > 0 {
            prop_assert!(matches!(
                manager.update_by_id(TaskId::new(1), TaskDraft::new(blank)),
                Err(CollectionError::Validation(_))
            ));
        }
        prop_assert_eq!(manager.list_all(), before);
    }

    #[test]
    fn blank_label_names_never_mutate(blank in "[ \t]{0,8}") {
        let manager = LabelManager::default();
        manager.create(LabelDraft::new("keep")).unwrap();
        prop_assert!(manager.create(LabelDraft::new(blank.clone())).is_err());
        prop_assert!(manager.update_by_id(LabelId::new(1), LabelDraft::new(blank)).is_err());
        prop_assert_eq!(manager.list_all().len(), 1);
        prop_assert_eq!(manager.get_by_id(LabelId::new(1)).unwrap().name, "keep");
    }

    #[test]
    fn update_preserves_ids_and_order(
        count in 1usize..10,
        target in any::<usize>(),
        description in "[a-zA-Z ]{0,10}[a-zA-Z]",
    ) {
        let manager = TaskManager::default();
        for i in 0..count {
            manager.create(TaskDraft::new(format!("t{i}"))).unwrap();
        }
        let before = ids(&manager);
        let id = before[target % before.len()];

        let updated = manager
            .update_by_id(TaskId::new(id), TaskDraft::new(description.clone()))
            .unwrap();
        prop_assert_eq!(updated.task_id.get(), id);
        prop_assert_eq!(updated.description, description);
        prop_assert_eq!(ids(&manager), before);
    }
}
