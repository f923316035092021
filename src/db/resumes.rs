//! Candidate pipeline store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CandidateResume {
    pub id: i32,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub candidate_mobile: Option<String>,
    pub applied_for_designation: Option<String>,
    pub req_id: Option<String>,
    pub experience: Option<String>,
    pub previous_company: Option<String>,
    pub previous_salary: Option<String>,
    pub reason_for_changing: Option<String>,
    pub marital_status: Option<String>,
    pub reference: Option<String>,
    pub address_present: Option<String>,
    pub resume: Option<String>,
    pub interviewer_planned: Option<String>,
    pub interviewer_actual: Option<String>,
    pub interviewer_status: Option<String>,
    pub candidate_status: Option<String>,
    pub joined_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateResumePayload {
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub candidate_mobile: Option<String>,
    pub applied_for_designation: Option<String>,
    pub req_id: Option<String>,
    pub experience: Option<String>,
    pub previous_company: Option<String>,
    pub previous_salary: Option<String>,
    pub reason_for_changing: Option<String>,
    pub marital_status: Option<String>,
    pub reference: Option<String>,
    pub address_present: Option<String>,
    pub resume: Option<String>,
    pub interviewer_planned: Option<String>,
    pub interviewer_actual: Option<String>,
    pub interviewer_status: Option<String>,
    pub candidate_status: Option<String>,
    pub joined_status: Option<String>,
}

impl Database {
    pub async fn list_resumes(&self) -> Result<Vec<CandidateResume>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM resume ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_resume(&self, id: i32) -> Result<Option<CandidateResume>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM resume WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Candidates marked Selected, most recently updated first.
    pub async fn list_selected_candidates(&self) -> Result<Vec<CandidateResume>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM resume WHERE candidate_status = 'Selected' ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create_resume(
        &self,
        data: &CandidateResumePayload,
    ) -> Result<CandidateResume, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO resume (
                candidate_name,
                candidate_email,
                candidate_mobile,
                applied_for_designation,
                req_id,
                experience,
                previous_company,
                previous_salary,
                reason_for_changing,
                marital_status,
                reference,
                address_present,
                resume,
                interviewer_planned,
                interviewer_actual,
                interviewer_status,
                candidate_status,
                joined_status
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18)
            RETURNING *
            "#,
        )
        .bind(&data.candidate_name)
        .bind(&data.candidate_email)
        .bind(&data.candidate_mobile)
        .bind(&data.applied_for_designation)
        .bind(&data.req_id)
        .bind(&data.experience)
        .bind(&data.previous_company)
        .bind(&data.previous_salary)
        .bind(&data.reason_for_changing)
        .bind(&data.marital_status)
        .bind(&data.reference)
        .bind(&data.address_present)
        .bind(&data.resume)
        .bind(&data.interviewer_planned)
        .bind(&data.interviewer_actual)
        .bind(&data.interviewer_status)
        .bind(&data.candidate_status)
        .bind(&data.joined_status)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_resume(
        &self,
        id: i32,
        data: &CandidateResumePayload,
    ) -> Result<Option<CandidateResume>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE resume
            SET
                candidate_name = COALESCE($1, candidate_name),
                candidate_email = COALESCE($2, candidate_email),
                candidate_mobile = COALESCE($3, candidate_mobile),
                applied_for_designation = COALESCE($4, applied_for_designation),
                req_id = COALESCE($5, req_id),
                experience = COALESCE($6, experience),
                previous_company = COALESCE($7, previous_company),
                previous_salary = COALESCE($8, previous_salary),
                reason_for_changing = COALESCE($9, reason_for_changing),
                marital_status = COALESCE($10, marital_status),
                reference = COALESCE($11, reference),
                address_present = COALESCE($12, address_present),
                resume = COALESCE($13, resume),
                interviewer_planned = COALESCE($14, interviewer_planned),
                interviewer_actual = COALESCE($15, interviewer_actual),
                interviewer_status = COALESCE($16, interviewer_status),
                candidate_status = COALESCE($17, candidate_status),
                joined_status = COALESCE($18, joined_status),
                updated_at = NOW()
            WHERE id = $19
            RETURNING *
            "#,
        )
        .bind(&data.candidate_name)
        .bind(&data.candidate_email)
        .bind(&data.candidate_mobile)
        .bind(&data.applied_for_designation)
        .bind(&data.req_id)
        .bind(&data.experience)
        .bind(&data.previous_company)
        .bind(&data.previous_salary)
        .bind(&data.reason_for_changing)
        .bind(&data.marital_status)
        .bind(&data.reference)
        .bind(&data.address_present)
        .bind(&data.resume)
        .bind(&data.interviewer_planned)
        .bind(&data.interviewer_actual)
        .bind(&data.interviewer_status)
        .bind(&data.candidate_status)
        .bind(&data.joined_status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_resume(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resume WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
