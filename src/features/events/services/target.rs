use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Pick the child row a patch entry applies to.
///
/// An explicit id must belong to `candidates`. Without one the event must
/// own exactly one such child.
pub(crate) fn pick_target<T>(
    candidates: &[T],
    requested: Option<Uuid>,
    id_of: impl Fn(&T) -> Uuid,
    kind: &str,
) -> Result<usize> {
    match requested {
        Some(id) => candidates
            .iter()
            .position(|c| id_of(c) == id)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found for this event", kind, id))),
        None => match candidates.len() {
            0 => Err(AppError::NotFound(format!("Event has no {}", kind))),
            1 => Ok(0),
            n => Err(AppError::BadRequest(format!(
                "Event has {} {} entries; specify the id to update",
                n, kind
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sole_child_is_implicit_target() {
        let ids = vec![Uuid::now_v7()];
        assert_eq!(pick_target(&ids, None, |id| *id, "venue").unwrap(), 0);
    }

    #[test]
    fn test_ambiguous_or_missing_target() {
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        assert!(matches!(
            pick_target(&ids, None, |id| *id, "venue"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            pick_target(&Vec::<Uuid>::new(), None, |id| *id, "venue"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_explicit_id_must_belong_to_event() {
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        assert_eq!(pick_target(&ids, Some(ids[1]), |id| *id, "venue").unwrap(), 1);
        assert!(matches!(
            pick_target(&ids, Some(Uuid::now_v7()), |id| *id, "venue"),
            Err(AppError::NotFound(_))
        ));
    }
}
