#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use super::super::todo_service::{ServiceError, TodoService, TodoServiceImpl};
    use crate::domain::{repository::TodoRepository, todo::{ContentError, CreateTodo, Priority, Todo, TodoId, UpdateTodo}};
    use crate::notify::{Notification, Notifier};
    use anyhow::Result;
    use async_trait::async_trait;

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        items: Arc<Mutex<BTreeMap<i64, Todo>>>,
        next_id: Arc<Mutex<i64>>,
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> { Ok(()) }
        async fn create(&self, input: CreateTodo) -> Result<Todo> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let todo = Todo {
                id: TodoId(*next),
                priority: input.priority.unwrap_or_default(),
                content: input.content,
                completed: input.completed.unwrap_or(false),
            };
            self.items.lock().unwrap().insert(todo.id.0, todo.clone());
            Ok(todo)
        }
        async fn get(&self, id: TodoId) -> Result<Option<Todo>> { Ok(self.items.lock().unwrap().get(&id.0).cloned()) }
        async fn list(&self) -> Result<Vec<Todo>> { Ok(self.items.lock().unwrap().values().rev().cloned().collect()) }
        async fn update(&self, todo: &Todo) -> Result<bool> {
            let mut map = self.items.lock().unwrap();
            let Some(slot) = map.get_mut(&todo.id.0) else { return Ok(false) };
            *slot = todo.clone();
            Ok(true)
        }
        async fn delete(&self, id: TodoId) -> Result<bool> { Ok(self.items.lock().unwrap().remove(&id.0).is_some()) }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) { self.sent.lock().unwrap().push(notification); }
    }

    fn service() -> (TodoServiceImpl<InMemoryRepo>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (TodoServiceImpl::new(InMemoryRepo::default(), notifier.clone()), notifier)
    }

    fn create(content: &str) -> CreateTodo {
        CreateTodo { content: content.into(), priority: None, completed: None }
    }

    #[tokio::test]
    async fn unit_create_and_get() {
        let (service, notifier) = service();
        let created = service.create(create("X")).await.unwrap();
        assert_eq!(created.content, "X");
        assert_eq!(created.priority, Priority::Normal);
        assert!(!created.completed);
        let got = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(got, created);
        assert_eq!(*notifier.sent.lock().unwrap(), vec![Notification::Created { content: "X".into() }]);
    }

    #[tokio::test]
    async fn create_rejects_bad_content_without_notifying() {
        let (service, notifier) = service();
        let err = service.create(create(&"x".repeat(51))).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidContent(ContentError::TooLong)));
        let err = service.create(create("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidContent(ContentError::Empty)));
        assert!(service.list().await.unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields_and_keeps_id() {
        let (service, notifier) = service();
        let created = service.create(create("old")).await.unwrap();
        let updated = service
            .update(created.id, UpdateTodo { completed: Some(true), priority: Some(Priority::Low), content: None })
            .await
            .unwrap();
        assert_eq!(updated, Todo { id: created.id, priority: Priority::Low, content: "old".into(), completed: true });
        assert_eq!(service.get(created.id).await.unwrap(), Some(updated));
        assert_eq!(
            notifier.sent.lock().unwrap().last(),
            Some(&Notification::Updated { content: "old".into(), priority: Priority::Low, completed: true })
        );
    }

    #[tokio::test]
    async fn update_missing_or_invalid() {
        let (service, _) = service();
        let err = service.update(TodoId(42), UpdateTodo::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::DoesNotExist));

        let created = service.create(create("keep")).await.unwrap();
        let err = service
            .update(created.id, UpdateTodo { content: Some("y".repeat(60)), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidContent(ContentError::TooLong)));
        assert_eq!(service.get(created.id).await.unwrap().unwrap().content, "keep");
    }

    #[tokio::test]
    async fn delete_twice() {
        let (service, notifier) = service();
        let created = service.create(create("gone")).await.unwrap();
        service.delete(created.id).await.unwrap();
        assert!(matches!(service.delete(created.id).await.unwrap_err(), ServiceError::DoesNotExist));
        assert_eq!(service.get(created.id).await.unwrap(), None);
        assert_eq!(notifier.sent.lock().unwrap().last(), Some(&Notification::Deleted { id: created.id }));
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
    }
}
