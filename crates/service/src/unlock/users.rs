use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use chrono::Utc;
use rand::rngs::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::unlock::user;
use models::validate;
use crate::errors::ServiceError;
use crate::integrity::{self, EntityKind, FieldSet};
use crate::pagination::Pagination;
use crate::patch::double_option;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Plain password, stored only as an argon2 hash.
    pub senha: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nome_completo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub nome_completo: Option<Option<String>>,
}

fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| ServiceError::Hash(e.to_string()))?
        .to_string())
}

/// Create a user; username and email must be free.
#[instrument(skip(db, input), fields(username = %input.username))]
pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> Result<user::Model, ServiceError> {
    validate::require_text("username", &input.username)?;
    validate::require_text("senha", &input.senha)?;
    if let Some(email) = &input.email {
        validate::validate_email(email)?;
    }

    let txn = db.begin().await?;
    let fields = FieldSet::new()
        .with("username", input.username.clone())
        .with_opt("email", input.email.clone());
    integrity::check_create(&txn, EntityKind::User, &fields).await?;

    let created = user::ActiveModel {
        id_usuario: Set(Uuid::now_v7()),
        username: Set(input.username),
        senha_hash: Set(hash_password(&input.senha)?),
        email: Set(input.email),
        nome_completo: Set(input.nome_completo),
        data_criacao: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(id = %created.id_usuario, "user created");
    Ok(created)
}

pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    Ok(user::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_user_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<user::Model>, ServiceError> {
    Ok(user::Entity::find().filter(user::Column::Username.eq(username)).one(db).await?)
}

pub async fn list_users(db: &DatabaseConnection, page: Pagination) -> Result<Vec<user::Model>, ServiceError> {
    let (offset, limit) = page.normalize()?;
    Ok(user::Entity::find()
        .order_by_asc(user::Column::IdUsuario)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?)
}

/// Apply a sparse update. The password is not patchable here.
#[instrument(skip(db, patch))]
pub async fn update_user(db: &DatabaseConnection, id: Uuid, patch: UserPatch) -> Result<user::Model, ServiceError> {
    if let Some(username) = &patch.username {
        validate::require_text("username", username)?;
    }
    if let Some(Some(email)) = &patch.email {
        validate::validate_email(email)?;
    }

    let txn = db.begin().await?;
    let existing = user::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::User))?;
    let current = FieldSet::new()
        .with("username", existing.username.clone())
        .with_opt("email", existing.email.clone());
    let changes = FieldSet::new()
        .maybe("username", patch.username.clone())
        .maybe_opt("email", patch.email.clone());
    integrity::check_update(&txn, EntityKind::User, id, &current, &changes).await?;

    let mut am: user::ActiveModel = existing.clone().into();
    if let Some(v) = patch.username { am.username = Set(v); }
    if let Some(v) = patch.email { am.email = Set(v); }
    if let Some(v) = patch.nome_completo { am.nome_completo = Set(v); }
    if !am.is_changed() {
        return Ok(existing);
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "user updated");
    Ok(updated)
}

/// Hard delete; refused while unlock jobs name the user as responsible.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if user::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(EntityKind::User));
    }
    integrity::guard_delete(&txn, EntityKind::User, id).await?;
    user::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id = %id, "user deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{password_hash::PasswordHash, PasswordVerifier};
    use crate::test_support::unlock_db;

    fn new_user(username: &str, email: Option<&str>) -> NewUser {
        NewUser {
            username: username.into(),
            senha: "segredo".into(),
            email: email.map(Into::into),
            nome_completo: None,
        }
    }

    #[tokio::test]
    async fn password_is_hashed_and_hidden() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let u = create_user(&db, new_user("tecnico", Some("t@x.com"))).await?;
        assert_ne!(u.senha_hash, "segredo");
        let parsed = PasswordHash::new(&u.senha_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        assert!(Argon2::default().verify_password(b"segredo", &parsed).is_ok());

        let json = serde_json::to_value(&u)?;
        assert!(json.get("senha_hash").is_none());
        assert_eq!(json["username"], "tecnico");
        Ok(())
    }

    #[tokio::test]
    async fn username_and_email_are_unique() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        create_user(&db, new_user("ana", Some("a@x.com"))).await?;
        assert!(matches!(create_user(&db, new_user("ana", None)).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(create_user(&db, new_user("bia", Some("a@x.com"))).await, Err(ServiceError::Conflict(_))));
        // null emails never collide
        create_user(&db, new_user("caio", None)).await?;
        create_user(&db, new_user("duda", None)).await?;
        assert_eq!(list_users(&db, Pagination::default()).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn patch_keeps_omitted_fields() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let mut input = new_user("ana", Some("a@x.com"));
        input.nome_completo = Some("Ana Lima".into());
        let u = create_user(&db, input).await?;

        let same = update_user(&db, u.id_usuario, UserPatch::default()).await?;
        assert_eq!(same, u);

        let patch = UserPatch { email: Some(None), ..Default::default() };
        let updated = update_user(&db, u.id_usuario, patch).await?;
        assert_eq!(updated.email, None);
        assert_eq!(updated.nome_completo.as_deref(), Some("Ana Lima"));
        assert_eq!(updated.username, "ana");

        let found = find_user_by_username(&db, "ana").await?.unwrap();
        assert_eq!(found.id_usuario, u.id_usuario);
        Ok(())
    }

    #[tokio::test]
    async fn renaming_to_own_username_never_conflicts() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let u = create_user(&db, new_user("ana", None)).await?;
        create_user(&db, new_user("bia", None)).await?;
        let own = UserPatch { username: Some("ana".into()), ..Default::default() };
        update_user(&db, u.id_usuario, own).await?;
        let taken = UserPatch { username: Some("bia".into()), ..Default::default() };
        assert!(matches!(update_user(&db, u.id_usuario, taken).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_fetch_is_none() -> Result<(), anyhow::Error> {
        let db = unlock_db().await?;
        let u = create_user(&db, new_user("ana", None)).await?;
        delete_user(&db, u.id_usuario).await?;
        assert!(get_user(&db, u.id_usuario).await?.is_none());
        assert!(matches!(delete_user(&db, u.id_usuario).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
