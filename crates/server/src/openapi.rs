use axum::Json;
use chrono::NaiveDate;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthDoc { pub status: String, pub service: String, pub timestamp: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(ToSchema)]
pub struct RemovedDoc { pub message: String }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// rows to skip (default 0)
    pub skip: Option<u64>,
    /// 1..=100 (default 100)
    pub limit: Option<u64>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodParams { pub data_inicio: NaiveDate, pub data_fim: NaiveDate }

// ---- celulares-api ----

#[derive(ToSchema)]
pub struct NewUserDoc { pub username: String, pub senha: String, pub email: Option<String>, pub nome_completo: Option<String> }

#[derive(ToSchema)]
pub struct NewClientDoc { pub nome: String, pub telefone: String, pub email: String, pub endereco: Option<String> }

#[derive(ToSchema)]
pub struct NewPhoneDoc { pub marca: String, pub modelo: String, pub imei: String, pub cliente_id: Uuid }

#[derive(ToSchema)]
pub struct NewUnlockJobDoc {
    pub celular_id: Uuid,
    /// FRP | iCloud | Senha | Network | Outro
    pub tipo_desbloqueio: String,
    /// Pendente | Em Processo | Concluído | Cancelado (default Pendente)
    pub status: Option<String>,
    pub data_entrada: NaiveDate,
    pub data_saida: Option<NaiveDate>,
    pub descricao_problema: Option<String>,
    pub observacoes: Option<String>,
    pub valor_cobrado: Option<f64>,
    pub usuario_responsavel_id: Option<Uuid>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PhoneFilterParams { pub cliente_id: Option<Uuid>, pub marca: Option<String> }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnlockJobFilterParams { pub status: Option<String>, pub tipo_desbloqueio: Option<String>, pub celular_id: Option<Uuid> }

// ---- maternidade-api ----

#[derive(ToSchema)]
pub struct NewPregnantPersonDoc {
    pub nome: String,
    /// 11 digits
    pub cpf: String,
    pub data_nascimento: NaiveDate,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub tipo_sanguineo: Option<String>,
    pub data_ultima_menstruacao: Option<NaiveDate>,
}

#[derive(ToSchema)]
pub struct NewProfessionalDoc {
    pub nome: String,
    /// Obstetra | Enfermeira Obstetra | Pediatra | Anestesista | Outro
    pub especialidade: String,
    pub registro_profissional: Option<String>,
    pub email: String,
    pub telefone: Option<String>,
}

#[derive(ToSchema)]
pub struct NewPrenatalVisitDoc {
    pub id_gestante: Uuid,
    pub id_profissional: Uuid,
    pub data_consulta: NaiveDate,
    pub semana_gestacional: Option<i32>,
    pub peso_kg: Option<f64>,
    pub pressao_arterial: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(ToSchema)]
pub struct NewExamDoc {
    pub id_gestante: Uuid,
    pub tipo_exame: String,
    pub data_exame: NaiveDate,
    pub resultado: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(ToSchema)]
pub struct NewBirthDoc {
    pub id_gestante: Uuid,
    pub id_profissional: Uuid,
    pub data_parto: NaiveDate,
    /// Normal | Cesárea | Fórceps
    pub tipo_parto: String,
    pub semana_gestacional: Option<i32>,
    pub peso_bebe_g: Option<i32>,
    pub sexo_bebe: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfessionalFilterParams { pub especialidade: Option<String> }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrenatalVisitFilterParams { pub id_gestante: Option<Uuid>, pub id_profissional: Option<Uuid> }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExamFilterParams { pub id_gestante: Option<Uuid>, pub tipo_exame: Option<String> }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BirthFilterParams { pub tipo_parto: Option<String> }

#[derive(OpenApi)]
#[openapi(
    info(title = "celulares-api"),
    paths(
        crate::routes::health,
        crate::routes::unlock::users::create,
        crate::routes::unlock::users::list,
        crate::routes::unlock::users::get,
        crate::routes::unlock::users::update,
        crate::routes::unlock::users::delete,
        crate::routes::unlock::clients::create,
        crate::routes::unlock::clients::list,
        crate::routes::unlock::clients::get,
        crate::routes::unlock::clients::update,
        crate::routes::unlock::clients::delete,
        crate::routes::unlock::phones::create,
        crate::routes::unlock::phones::list,
        crate::routes::unlock::phones::by_client,
        crate::routes::unlock::phones::get,
        crate::routes::unlock::phones::update,
        crate::routes::unlock::phones::delete,
        crate::routes::unlock::unlock_jobs::create,
        crate::routes::unlock::unlock_jobs::list,
        crate::routes::unlock::unlock_jobs::by_phone,
        crate::routes::unlock::unlock_jobs::get,
        crate::routes::unlock::unlock_jobs::update,
        crate::routes::unlock::unlock_jobs::delete,
        crate::routes::unlock::reports::pending,
        crate::routes::unlock::reports::period,
        crate::routes::unlock::reports::by_kind,
        crate::routes::unlock::reports::client_history,
        crate::routes::unlock::reports::general,
    ),
    components(schemas(HealthDoc, ErrorDoc, RemovedDoc, NewUserDoc, NewClientDoc, NewPhoneDoc, NewUnlockJobDoc)),
    tags(
        (name = "health"),
        (name = "usuarios"),
        (name = "clientes"),
        (name = "celulares"),
        (name = "desbloqueios"),
        (name = "relatorios"),
        (name = "estatisticas")
    )
)]
pub struct UnlockApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(title = "maternidade-api"),
    paths(
        crate::routes::health,
        crate::routes::maternity::pregnant_people::create,
        crate::routes::maternity::pregnant_people::list,
        crate::routes::maternity::pregnant_people::get,
        crate::routes::maternity::pregnant_people::update,
        crate::routes::maternity::pregnant_people::delete,
        crate::routes::maternity::professionals::create,
        crate::routes::maternity::professionals::list,
        crate::routes::maternity::professionals::get,
        crate::routes::maternity::professionals::update,
        crate::routes::maternity::professionals::delete,
        crate::routes::maternity::prenatal_visits::create,
        crate::routes::maternity::prenatal_visits::list,
        crate::routes::maternity::prenatal_visits::get,
        crate::routes::maternity::prenatal_visits::update,
        crate::routes::maternity::prenatal_visits::delete,
        crate::routes::maternity::exams::create,
        crate::routes::maternity::exams::list,
        crate::routes::maternity::exams::get,
        crate::routes::maternity::exams::update,
        crate::routes::maternity::exams::delete,
        crate::routes::maternity::births::create,
        crate::routes::maternity::births::list,
        crate::routes::maternity::births::by_pregnant_person,
        crate::routes::maternity::births::get,
        crate::routes::maternity::births::update,
        crate::routes::maternity::births::delete,
        crate::routes::maternity::reports::period,
        crate::routes::maternity::reports::by_kind,
        crate::routes::maternity::reports::pregnant_person_history,
        crate::routes::maternity::reports::general,
    ),
    components(schemas(
        HealthDoc,
        ErrorDoc,
        RemovedDoc,
        NewPregnantPersonDoc,
        NewProfessionalDoc,
        NewPrenatalVisitDoc,
        NewExamDoc,
        NewBirthDoc
    )),
    tags(
        (name = "health"),
        (name = "gestantes"),
        (name = "profissionais"),
        (name = "consultas"),
        (name = "exames"),
        (name = "partos"),
        (name = "relatorios"),
        (name = "estatisticas")
    )
)]
pub struct MaternityApiDoc;

pub async fn unlock_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(UnlockApiDoc::openapi())
}

pub async fn maternity_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(MaternityApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_doc_lists_crud_paths() {
        let doc = UnlockApiDoc::openapi();
        for p in ["/health", "/clientes", "/clientes/{id}", "/celulares", "/desbloqueios/{id}", "/estatisticas/gerais"] {
            assert!(doc.paths.paths.contains_key(p), "missing {p}");
        }
    }

    #[test]
    fn maternity_doc_lists_crud_paths() {
        let doc = MaternityApiDoc::openapi();
        for p in ["/gestantes", "/gestantes/{id}/parto", "/partos", "/consultas/{id}", "/relatorios/tipos-parto"] {
            assert!(doc.paths.paths.contains_key(p), "missing {p}");
        }
    }
}
