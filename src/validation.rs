//! Form validation run before a mutation is sent.

use sortbox_sync::{AdvertFields, FieldErrors, NewContainer};

/// Longest item name the forms accept
pub const ITEM_NAME_MAX: usize = 50;

fn require(errors: &mut FieldErrors, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{} is required", label));
    }
}

pub fn validate_container(fields: &NewContainer) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", &fields.name, "Name");
    require(&mut errors, "color", &fields.color, "Color");
    errors
}

pub fn validate_item_name(name: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", name, "Name");
    if name.trim().chars().count() > ITEM_NAME_MAX {
        errors.insert("name", format!("Name must be at most {} characters", ITEM_NAME_MAX));
    }
    errors
}

pub fn validate_advert(fields: &AdvertFields) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "title", &fields.title, "Title");
    require(&mut errors, "description", &fields.description, "Description");
    require(&mut errors, "photo", &fields.photo, "Photo");
    let photo = fields.photo.trim();
    if !photo.is_empty() && !(photo.starts_with("http://") || photo.starts_with("https://")) {
        errors.insert("photo", "Photo must be a valid URL");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_container_name_rejected() {
        let fields = NewContainer {
            name: "  ".to_string(),
            color: "#fff".to_string(),
            description: String::new(),
        };
        let errors = validate_container(&fields);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("color"), None);
    }

    #[test]
    fn test_item_name_length() {
        assert!(validate_item_name("Bottle").is_empty());
        let long = "x".repeat(ITEM_NAME_MAX + 1);
        assert_eq!(
            validate_item_name(&long).get("name"),
            Some("Name must be at most 50 characters")
        );
    }

    #[test]
    fn test_advert_photo_must_be_url() {
        let mut fields = AdvertFields {
            title: "Sofa".to_string(),
            description: "Grey".to_string(),
            photo: "sofa.png".to_string(),
        };
        assert_eq!(validate_advert(&fields).get("photo"), Some("Photo must be a valid URL"));

        fields.photo = "https://img.example/sofa.png".to_string();
        assert!(validate_advert(&fields).is_empty());
    }
}
