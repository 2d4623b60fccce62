//! Codec between raw catalog records and typed entities.
//!
//! Raw records have the shape `{ "id": ..., "type": ..., "attributes": {...} }`.
//! Decoding validates identity (`id`, kind tag) and the required display
//! field, and applies the per-kind defaults for everything else in one place;
//! call sites never null-coalesce individual attributes. Encoding produces a
//! record that decodes back to an equal entity in every persisted field
//! (`is_favorite` is transient and never encoded).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::entities::{Book, Character, Movie, Potion, Spell};
use crate::entity::Entity;
use crate::error::DecodeError;
use crate::kind::EntityKind;

/// Decode a raw record of the given kind into a typed entity.
pub fn decode(kind: EntityKind, raw: &Value) -> Result<Entity, DecodeError> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if id.is_empty() {
        return Err(DecodeError::MissingId);
    }

    if let Some(tag) = raw.get("type").and_then(Value::as_str) {
        if tag != kind.as_str() {
            return Err(DecodeError::TypeMismatch {
                expected: kind,
                found: tag.to_string(),
            });
        }
    }

    let attributes = raw
        .get("attributes")
        .filter(|value| value.is_object())
        .cloned()
        .ok_or(DecodeError::MissingAttributes)?;

    match kind {
        EntityKind::Character => {
            let mut record: Character = decode_attributes(attributes)?;
            record.id = id.to_string();
            require(&record.name, "name")?;
            Ok(Entity::Character(record))
        }
        EntityKind::Spell => {
            let mut record: Spell = decode_attributes(attributes)?;
            record.id = id.to_string();
            require(&record.name, "name")?;
            Ok(Entity::Spell(record))
        }
        EntityKind::Potion => {
            let mut record: Potion = decode_attributes(attributes)?;
            record.id = id.to_string();
            require(&record.name, "name")?;
            Ok(Entity::Potion(record))
        }
        EntityKind::Book => {
            let mut record: Book = decode_attributes(attributes)?;
            record.id = id.to_string();
            require(&record.title, "title")?;
            Ok(Entity::Book(record))
        }
        EntityKind::Movie => {
            let mut record: Movie = decode_attributes(attributes)?;
            record.id = id.to_string();
            require(&record.title, "title")?;
            Ok(Entity::Movie(record))
        }
    }
}

/// Encode an entity as a raw record sufficient to reconstruct it.
pub fn encode(entity: &Entity) -> Value {
    let attributes = match entity {
        Entity::Character(record) => attributes_of(record),
        Entity::Spell(record) => attributes_of(record),
        Entity::Potion(record) => attributes_of(record),
        Entity::Book(record) => attributes_of(record),
        Entity::Movie(record) => attributes_of(record),
    };
    json!({
        "id": entity.id(),
        "type": entity.kind().as_str(),
        "attributes": attributes,
    })
}

fn decode_attributes<T: DeserializeOwned>(attributes: Value) -> Result<T, DecodeError> {
    serde_json::from_value(attributes)
        .map_err(|e| DecodeError::InvalidAttributes(e.to_string()))
}

fn require(value: &str, field: &'static str) -> Result<(), DecodeError> {
    if value.is_empty() {
        return Err(DecodeError::MissingRequiredField(field));
    }
    Ok(())
}

fn attributes_of<T: Serialize>(record: &T) -> Value {
    let mut value =
        serde_json::to_value(record).unwrap_or_else(|_| Value::Object(Map::new()));
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_character() -> Entity {
        Entity::Character(Character {
            id: "c-1".to_string(),
            name: "Harry Potter".to_string(),
            slug: "harry-potter".to_string(),
            house: "Gryffindor".to_string(),
            alias_names: vec!["The Boy Who Lived".to_string()],
            animagus: None,
            patronus: "stag".to_string(),
            wands: vec!["holly, phoenix feather, 11 inches".to_string()],
            ..Character::default()
        })
    }

    fn sample_spell() -> Entity {
        Entity::Spell(Spell {
            id: "s-1".to_string(),
            name: "Stunning Spell".to_string(),
            incantation: "Stupefy".to_string(),
            effect: "Stuns the target".to_string(),
            light: "Red".to_string(),
            image: Some("https://example.org/stupefy.png".to_string()),
            ..Spell::default()
        })
    }

    fn sample_potion() -> Entity {
        Entity::Potion(Potion {
            id: "p-1".to_string(),
            name: "Polyjuice Potion".to_string(),
            difficulty: "Advanced".to_string(),
            effect: "Transforms the drinker".to_string(),
            ..Potion::default()
        })
    }

    fn sample_book() -> Entity {
        Entity::Book(Book {
            id: "b-1".to_string(),
            title: "Harry Potter and the Philosopher's Stone".to_string(),
            author: "J. K. Rowling".to_string(),
            pages: Some(223),
            release_date: Some("1997-06-26".to_string()),
            ..Book::default()
        })
    }

    fn sample_movie() -> Entity {
        Entity::Movie(Movie {
            id: "m-1".to_string(),
            title: "Harry Potter and the Chamber of Secrets".to_string(),
            directors: vec!["Chris Columbus".to_string()],
            running_time: "161 minutes".to_string(),
            ..Movie::default()
        })
    }

    #[test]
    fn round_trip_every_kind() {
        for entity in [
            sample_character(),
            sample_spell(),
            sample_potion(),
            sample_book(),
            sample_movie(),
        ] {
            let raw = encode(&entity);
            let decoded = decode(entity.kind(), &raw).expect("round trip decode");
            assert_eq!(decoded, entity);
        }
    }

    #[test]
    fn favorite_flag_is_never_encoded() {
        let mut entity = sample_spell();
        entity.set_favorite(true);
        let raw = encode(&entity);
        assert!(raw
            .get("attributes")
            .and_then(|a| a.get("is_favorite"))
            .is_none());
        let decoded = decode(EntityKind::Spell, &raw).expect("decode");
        assert!(!decoded.is_favorite());
    }

    #[test]
    fn missing_id_is_rejected() {
        let raw = json!({ "type": "spell", "attributes": { "name": "Lumos" } });
        assert_eq!(decode(EntityKind::Spell, &raw), Err(DecodeError::MissingId));

        let raw = json!({ "id": "", "type": "spell", "attributes": { "name": "Lumos" } });
        assert_eq!(decode(EntityKind::Spell, &raw), Err(DecodeError::MissingId));
    }

    #[test]
    fn missing_attributes_is_rejected() {
        let raw = json!({ "id": "s-2", "type": "spell" });
        assert_eq!(
            decode(EntityKind::Spell, &raw),
            Err(DecodeError::MissingAttributes)
        );

        let raw = json!({ "id": "s-2", "type": "spell", "attributes": "nope" });
        assert_eq!(
            decode(EntityKind::Spell, &raw),
            Err(DecodeError::MissingAttributes)
        );
    }

    #[test]
    fn mismatched_type_tag_is_rejected() {
        let raw = json!({ "id": "s-2", "type": "potion", "attributes": { "name": "Lumos" } });
        assert_eq!(
            decode(EntityKind::Spell, &raw),
            Err(DecodeError::TypeMismatch {
                expected: EntityKind::Spell,
                found: "potion".to_string(),
            })
        );
    }

    #[test]
    fn missing_display_name_is_rejected() {
        let raw = json!({ "id": "c-9", "type": "character", "attributes": { "house": "Ravenclaw" } });
        assert_eq!(
            decode(EntityKind::Character, &raw),
            Err(DecodeError::MissingRequiredField("name"))
        );

        let raw = json!({ "id": "b-9", "type": "book", "attributes": { "author": "Unknown" } });
        assert_eq!(
            decode(EntityKind::Book, &raw),
            Err(DecodeError::MissingRequiredField("title"))
        );
    }

    #[test]
    fn absent_optional_attributes_default() {
        let raw = json!({
            "id": "c-3",
            "type": "character",
            "attributes": { "name": "Luna Lovegood" },
        });
        let decoded = decode(EntityKind::Character, &raw).expect("decode");
        let Entity::Character(character) = decoded else {
            panic!("expected a character");
        };
        assert_eq!(character.name, "Luna Lovegood");
        assert_eq!(character.house, "");
        assert_eq!(character.alias_names, Vec::<String>::new());
        assert_eq!(character.animagus, None);
        assert!(!character.is_favorite);
    }

    #[test]
    fn absent_type_tag_is_tolerated() {
        let raw = json!({ "id": "p-3", "attributes": { "name": "Veritaserum" } });
        let decoded = decode(EntityKind::Potion, &raw).expect("decode");
        assert_eq!(decoded.kind(), EntityKind::Potion);
        assert_eq!(decoded.display_name(), "Veritaserum");
    }

    #[test]
    fn wrongly_shaped_attributes_are_rejected() {
        let raw = json!({
            "id": "m-4",
            "type": "movie",
            "attributes": { "title": "Prisoner of Azkaban", "directors": "Alfonso Cuarón" },
        });
        assert!(matches!(
            decode(EntityKind::Movie, &raw),
            Err(DecodeError::InvalidAttributes(_))
        ));
    }

    #[test]
    fn decoding_is_deterministic() {
        let raw = json!({
            "id": "s-5",
            "type": "spell",
            "attributes": { "name": "Expelliarmus", "light": "Scarlet" },
        });
        let first = decode(EntityKind::Spell, &raw).expect("decode");
        let second = decode(EntityKind::Spell, &raw).expect("decode");
        assert_eq!(first, second);
    }
}
