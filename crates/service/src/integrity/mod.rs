//! Referential-integrity engine shared by every entity of both deployments.
//!
//! Services describe a write as a [`FieldSet`] (column name to candidate value)
//! and hand it to [`check_create`] / [`check_update`] together with the
//! [`EntityKind`]; the engine walks [`rules_for`] in order and fails on the
//! first violated rule. [`guard_delete`] evaluates every delete guard so the
//! error can name all blocking dependents.
//!
//! All checks run on the caller's connection, normally the request's
//! transaction, so they observe the same snapshot the write will.

pub mod rules;

use std::collections::BTreeMap;
use std::fmt;

use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, Value};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;

pub use rules::{rules_for, Rule};

/// Entity types known to the rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Client,
    Phone,
    UnlockJob,
    PregnantPerson,
    Professional,
    PrenatalVisit,
    Exam,
    Birth,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::User,
        EntityKind::Client,
        EntityKind::Phone,
        EntityKind::UnlockJob,
        EntityKind::PregnantPerson,
        EntityKind::Professional,
        EntityKind::PrenatalVisit,
        EntityKind::Exam,
        EntityKind::Birth,
    ];

    pub fn table(self) -> &'static str {
        match self {
            EntityKind::User => "usuario",
            EntityKind::Client => "cliente",
            EntityKind::Phone => "celular",
            EntityKind::UnlockJob => "desbloqueio",
            EntityKind::PregnantPerson => "gestante",
            EntityKind::Professional => "profissional",
            EntityKind::PrenatalVisit => "consulta_prenatal",
            EntityKind::Exam => "exame",
            EntityKind::Birth => "parto",
        }
    }

    pub fn primary_key(self) -> &'static str {
        match self {
            EntityKind::User => "id_usuario",
            EntityKind::Client => "id_cliente",
            EntityKind::Phone => "id_celular",
            EntityKind::UnlockJob => "id_desbloqueio",
            EntityKind::PregnantPerson => "id_gestante",
            EntityKind::Professional => "id_profissional",
            EntityKind::PrenatalVisit => "id_consulta",
            EntityKind::Exam => "id_exame",
            EntityKind::Birth => "id_parto",
        }
    }

    /// Human readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Client => "client",
            EntityKind::Phone => "phone",
            EntityKind::UnlockJob => "unlock job",
            EntityKind::PregnantPerson => "pregnant person",
            EntityKind::Professional => "professional",
            EntityKind::PrenatalVisit => "prenatal visit",
            EntityKind::Exam => "exam",
            EntityKind::Birth => "birth",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate column values of a write.
///
/// A column missing from the set was not supplied; a column mapped to `None`
/// was supplied as null.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet(BTreeMap<&'static str, Option<Value>>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplied, non-null.
    pub fn with<T: Into<Value>>(mut self, field: &'static str, value: T) -> Self {
        self.0.insert(field, Some(value.into()));
        self
    }

    /// Supplied, possibly null.
    pub fn with_opt<T: Into<Value>>(mut self, field: &'static str, value: Option<T>) -> Self {
        self.0.insert(field, value.map(Into::into));
        self
    }

    /// Supplied only when `Some`.
    pub fn maybe<T: Into<Value>>(self, field: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with(field, v),
            None => self,
        }
    }

    /// Sparse nullable field: outer `None` is "not supplied".
    pub fn maybe_opt<T: Into<Value>>(self, field: &'static str, value: Option<Option<T>>) -> Self {
        match value {
            Some(v) => self.with_opt(field, v),
            None => self,
        }
    }

    pub fn supplied(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Non-null value of `field`, if supplied.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.0.get(field).and_then(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

async fn exists_where<C: ConnectionTrait>(
    db: &C,
    table: &'static str,
    column: &'static str,
    value: &Value,
    exclude: Option<(&'static str, Uuid)>,
) -> Result<bool, ServiceError> {
    let mut query = Query::select();
    query
        .expr(Expr::val(1))
        .from(Alias::new(table))
        .and_where(Expr::col(Alias::new(column)).eq(value.clone()))
        .limit(1);
    if let Some((pk, id)) = exclude {
        query.and_where(Expr::col(Alias::new(pk)).ne(id));
    }
    let stmt = db.get_database_backend().build(&query);
    Ok(db.query_one(stmt).await?.is_some())
}

/// Whether a record of `kind` other than `exclude` holds `value` in `field`.
pub async fn is_taken<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    field: &'static str,
    value: &Value,
    exclude: Option<Uuid>,
) -> Result<bool, ServiceError> {
    exists_where(db, kind.table(), field, value, exclude.map(|id| (kind.primary_key(), id))).await
}

pub async fn ensure_unique<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    field: &'static str,
    value: &Value,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError> {
    if is_taken(db, kind, field, value, exclude).await? {
        debug!(entity = %kind, field, "unique value already taken");
        return Err(ServiceError::Conflict(format!("{kind} {field} already registered")));
    }
    Ok(())
}

/// NotFound unless a `kind` record with primary key `id` exists.
pub async fn ensure_exists<C: ConnectionTrait>(db: &C, kind: EntityKind, id: &Value) -> Result<(), ServiceError> {
    if !exists_where(db, kind.table(), kind.primary_key(), id, None).await? {
        debug!(entity = %kind, "referenced record missing");
        return Err(ServiceError::not_found(kind));
    }
    Ok(())
}

async fn ensure_one_to_one<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    field: &'static str,
    parent: EntityKind,
    value: &Value,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError> {
    ensure_exists(db, parent, value).await?;
    if is_taken(db, kind, field, value, exclude).await? {
        debug!(entity = %kind, field, "one-to-one reference already held");
        return Err(ServiceError::Conflict(format!("{parent} already has a {kind} record")));
    }
    Ok(())
}

fn null_required(kind: EntityKind, field: &'static str) -> ServiceError {
    debug!(entity = %kind, field, "required reference missing");
    ServiceError::Validation(format!("{field} is required"))
}

/// Validate a new record of `kind` before insertion.
#[instrument(level = "debug", skip(db, values), fields(entity = %kind))]
pub async fn check_create<C: ConnectionTrait>(db: &C, kind: EntityKind, values: &FieldSet) -> Result<(), ServiceError> {
    for rule in rules_for(kind) {
        match *rule {
            Rule::UniqueField { field } => {
                if let Some(v) = values.value(field) {
                    ensure_unique(db, kind, field, v, None).await?;
                }
            }
            Rule::RequiredRef { field, parent } => {
                let v = values.value(field).ok_or_else(|| null_required(kind, field))?;
                ensure_exists(db, parent, v).await?;
            }
            Rule::OptionalRef { field, parent } => {
                if let Some(v) = values.value(field) {
                    ensure_exists(db, parent, v).await?;
                }
            }
            Rule::OneToOneRef { field, parent } => {
                let v = values.value(field).ok_or_else(|| null_required(kind, field))?;
                ensure_one_to_one(db, kind, field, parent, v, None).await?;
            }
            Rule::DeleteGuard { .. } => {}
        }
    }
    Ok(())
}

/// Validate a sparse update of record `id` against its stored values.
///
/// Unique fields and required references are only checked when the patch
/// supplies a value that differs from `current`. Optional references are
/// resolved whenever a non-null value is supplied.
#[instrument(level = "debug", skip(db, current, patch), fields(entity = %kind))]
pub async fn check_update<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    id: Uuid,
    current: &FieldSet,
    patch: &FieldSet,
) -> Result<(), ServiceError> {
    for rule in rules_for(kind) {
        match *rule {
            Rule::UniqueField { field } => {
                if let Some(v) = patch.value(field) {
                    if current.value(field) != Some(v) {
                        ensure_unique(db, kind, field, v, Some(id)).await?;
                    }
                }
            }
            Rule::RequiredRef { field, parent } => {
                if !patch.supplied(field) {
                    continue;
                }
                let v = patch.value(field).ok_or_else(|| null_required(kind, field))?;
                if current.value(field) != Some(v) {
                    ensure_exists(db, parent, v).await?;
                }
            }
            Rule::OptionalRef { field, parent } => {
                if let Some(v) = patch.value(field) {
                    ensure_exists(db, parent, v).await?;
                }
            }
            Rule::OneToOneRef { field, parent } => {
                if !patch.supplied(field) {
                    continue;
                }
                let v = patch.value(field).ok_or_else(|| null_required(kind, field))?;
                if current.value(field) != Some(v) {
                    ensure_one_to_one(db, kind, field, parent, v, Some(id)).await?;
                }
            }
            Rule::DeleteGuard { .. } => {}
        }
    }
    Ok(())
}

/// Conflict naming every dependent type that still references record `id`.
#[instrument(level = "debug", skip(db), fields(entity = %kind))]
pub async fn guard_delete<C: ConnectionTrait>(db: &C, kind: EntityKind, id: Uuid) -> Result<(), ServiceError> {
    let key = Value::from(id);
    let mut blockers: Vec<&'static str> = Vec::new();
    for rule in rules_for(kind) {
        if let Rule::DeleteGuard { dependent, field } = *rule {
            if exists_where(db, dependent.table(), field, &key, None).await? && !blockers.contains(&dependent.label()) {
                blockers.push(dependent.label());
            }
        }
    }
    if blockers.is_empty() {
        return Ok(());
    }
    debug!(entity = %kind, ?blockers, "delete blocked by dependents");
    Err(ServiceError::Conflict(format!("cannot delete {kind}: referenced by {}", blockers.join(", "))))
}
