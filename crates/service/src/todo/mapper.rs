use models::{Todo, TodoItem};

/// Project a stored item onto its DTO. Absent in, absent out.
pub fn to_dto(entity: Option<&TodoItem>) -> Option<Todo> {
    entity.map(|e| Todo {
        id: e.id.clone(),
        title: e.title.clone(),
        description: e.description.clone(),
        completed: e.completed,
        created_at: e.created_at,
        updated_at: e.updated_at,
    })
}

pub fn into_dto(entity: TodoItem) -> Todo {
    Todo {
        id: entity.id,
        title: entity.title,
        description: entity.description,
        completed: entity.completed,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample() -> TodoItem {
        let created = Utc::now() - Duration::days(2);
        TodoItem {
            id: "4f0c".into(),
            title: "Buy milk".into(),
            description: "2 litres, semi-skimmed".into(),
            completed: true,
            created_at: created,
            updated_at: created + Duration::hours(5),
        }
    }

    #[test]
    fn preserves_every_field() {
        let entity = sample();
        let dto = to_dto(Some(&entity)).unwrap();
        assert_eq!(dto.id, entity.id);
        assert_eq!(dto.title, entity.title);
        assert_eq!(dto.description, entity.description);
        assert_eq!(dto.completed, entity.completed);
        assert_eq!(dto.created_at, entity.created_at);
        assert_eq!(dto.updated_at, entity.updated_at);
        assert_eq!(into_dto(entity), dto);
    }

    #[test]
    fn absent_maps_to_absent() {
        assert!(to_dto(None).is_none());
    }
}
