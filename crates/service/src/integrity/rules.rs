//! Integrity rule table for every entity of both deployments.
//!
//! Rules are evaluated in the order listed here, so the order of the slice is
//! also the order in which a request learns about its first violation.

use super::EntityKind;

/// One integrity rule attached to an entity type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// `field` holds a value no other record of the entity may hold.
    UniqueField { field: &'static str },
    /// `field` must reference an existing `parent`; never null.
    RequiredRef { field: &'static str, parent: EntityKind },
    /// `field` may be null; when set it must reference an existing `parent`.
    OptionalRef { field: &'static str, parent: EntityKind },
    /// Required reference that at most one record of the entity may hold.
    OneToOneRef { field: &'static str, parent: EntityKind },
    /// Records of `dependent` pointing at this entity through `field` block deletion.
    DeleteGuard { dependent: EntityKind, field: &'static str },
}

use EntityKind::*;
use Rule::*;

const USER: &[Rule] = &[
    UniqueField { field: "username" },
    UniqueField { field: "email" },
    DeleteGuard { dependent: UnlockJob, field: "usuario_responsavel_id" },
];

const CLIENT: &[Rule] = &[
    UniqueField { field: "email" },
    DeleteGuard { dependent: Phone, field: "cliente_id" },
];

const PHONE: &[Rule] = &[
    UniqueField { field: "imei" },
    RequiredRef { field: "cliente_id", parent: Client },
    DeleteGuard { dependent: UnlockJob, field: "celular_id" },
];

const UNLOCK_JOB: &[Rule] = &[
    RequiredRef { field: "celular_id", parent: Phone },
    OptionalRef { field: "usuario_responsavel_id", parent: User },
];

// Exams and births are left to the store's foreign keys.
const PREGNANT_PERSON: &[Rule] = &[
    UniqueField { field: "cpf" },
    DeleteGuard { dependent: PrenatalVisit, field: "id_gestante" },
];

const PROFESSIONAL: &[Rule] = &[
    UniqueField { field: "email" },
    DeleteGuard { dependent: PrenatalVisit, field: "id_profissional" },
    DeleteGuard { dependent: Birth, field: "id_profissional" },
];

const PRENATAL_VISIT: &[Rule] = &[
    RequiredRef { field: "id_gestante", parent: PregnantPerson },
    RequiredRef { field: "id_profissional", parent: Professional },
];

const EXAM: &[Rule] = &[RequiredRef { field: "id_gestante", parent: PregnantPerson }];

const BIRTH: &[Rule] = &[
    OneToOneRef { field: "id_gestante", parent: PregnantPerson },
    RequiredRef { field: "id_profissional", parent: Professional },
];

/// Rules for `kind`, in evaluation order.
pub fn rules_for(kind: EntityKind) -> &'static [Rule] {
    match kind {
        User => USER,
        Client => CLIENT,
        Phone => PHONE,
        UnlockJob => UNLOCK_JOB,
        PregnantPerson => PREGNANT_PERSON,
        Professional => PROFESSIONAL,
        PrenatalVisit => PRENATAL_VISIT,
        Exam => EXAM,
        Birth => BIRTH,
    }
}
