use crate::validators::{non_blank, FieldErrors, Numeric};
use serde::Deserialize;
use utoipa::ToSchema;

const NAME_REQUIRED: &str = "Menu name is required";
const MEALS_REQUIRED: &str = "No meal have been added to menu";
const MEALS_INVALID: &str = "Meals must be a list of meal ids";

/// A meal on a menu payload, either a bare id or an object carrying `id`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MealRef {
    Id(Numeric),
    Object { id: Numeric },
}

impl MealRef {
    fn id(&self) -> Option<i32> {
        match self {
            MealRef::Id(id) | MealRef::Object { id } => id.as_positive_i32(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MenuPayload {
    pub name: Option<String>,
    pub meals: Option<Vec<MealRef>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSetup {
    pub name: String,
    /// Distinct ids, in the order first seen.
    pub meal_ids: Vec<i32>,
}

pub fn validate_menu(payload: &MenuPayload) -> Result<MenuSetup, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = non_blank(payload.name.as_deref());
    if name.is_none() {
        errors.add("name", NAME_REQUIRED);
    }

    let mut meal_ids: Vec<i32> = Vec::new();
    match payload.meals.as_deref() {
        None | Some([]) => errors.add("meals", MEALS_REQUIRED),
        Some(refs) => {
            for meal in refs {
                match meal.id() {
                    Some(id) if !meal_ids.contains(&id) => meal_ids.push(id),
                    Some(_) => {}
                    None => {
                        errors.add("meals", MEALS_INVALID);
                        break;
                    }
                }
            }
        }
    }

    match name {
        Some(name) if errors.is_empty() => Ok(MenuSetup { name, meal_ids }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> MenuPayload {
        serde_json::from_value(json).expect("payload shape")
    }

    #[test]
    fn accepts_ids_and_meal_objects() {
        let payload = parse(serde_json::json!({
            "name": "Menu for Monday",
            "meals": [1, {"id": 2, "name": "Vegetable Soup"}, "3", 1]
        }));
        let setup = validate_menu(&payload).unwrap();
        assert_eq!(setup.name, "Menu for Monday");
        assert_eq!(setup.meal_ids, vec![1, 2, 3]);
    }

    #[test]
    fn rejects_empty_meal_list() {
        let payload = parse(serde_json::json!({"name": "Menu", "meals": []}));
        let errors = validate_menu(&payload).unwrap_err();
        assert_eq!(errors.get("meals"), Some(MEALS_REQUIRED));
    }

    #[test]
    fn rejects_missing_name() {
        let payload = parse(serde_json::json!({"meals": [1]}));
        let errors = validate_menu(&payload).unwrap_err();
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED));
        assert!(!errors.contains("meals"));
    }

    #[test]
    fn rejects_non_numeric_meal_reference() {
        let payload = parse(serde_json::json!({"name": "Menu", "meals": ["soup"]}));
        let errors = validate_menu(&payload).unwrap_err();
        assert_eq!(errors.get("meals"), Some(MEALS_INVALID));
    }
}
