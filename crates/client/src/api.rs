use crate::{
    error::ClientError,
    report::Document,
    resource::Resource,
    session::{Session, SessionStore},
};
use models::{
    attendance::{AttendanceEntry, AttendanceSummary},
    auth::{LoginRequest, LoginResponse},
    filter::FilterSet,
    grades::GradeRecord,
    list_view::ListView,
    options::FilterOptions,
    records::{ScheduleRecord, SchoolYearRecord, SectionDetail, StudentRecord},
    roles::{RecordStatus, Role},
    updates::StudentUpdate,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

type Params = Vec<(&'static str, String)>;

fn school_year_scope(school_year: Option<&str>) -> Params {
    school_year
        .map(|label| vec![("school_year", label.to_string())])
        .unwrap_or_default()
}

/// HTTP client for one school records server
///
/// Every call except [`login`](Self::login) needs a session; calls made
/// without one fail with [`ClientError::NotLoggedIn`] before any request is
/// sent.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// * `base_url` - e.g. `http://localhost:3001`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: SessionStore::new(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Logs in and keeps the session on success
    ///
    /// Returns the granted role, or `None` when the credentials were
    /// rejected. A rejected login drops any previous session.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<Role>, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/login"))
            .json(&request)
            .send()
            .await?;

        match Self::decode::<LoginResponse>(response).await? {
            LoginResponse {
                authenticated: true,
                role: Some(role),
                token: Some(token),
            } => {
                self.session.begin(Session {
                    username: request.username,
                    role,
                    token,
                });
                Ok(Some(role))
            }
            _ => {
                log::info!("Login rejected for {username}");
                self.session.end();
                Ok(None)
            }
        }
    }

    pub fn logout(&mut self) -> Option<Session> {
        self.session.end()
    }

    /// Fetches a list with the given filters applied by the server
    pub async fn list<T: Resource>(&self, filters: &FilterSet) -> Result<Vec<T>, ClientError> {
        self.get(T::PATH, &filters.to_params()).await
    }

    /// Re-requests a view's list with its current filters
    ///
    /// Returns whether the response was installed; it is dropped when a
    /// newer fetch for the same view was accepted first.
    pub async fn reload<T: Resource>(&self, view: &mut ListView<T>) -> Result<bool, ClientError> {
        let ticket = view.begin_fetch();
        let items = self.list::<T>(view.filters()).await?;
        Ok(view.replace(ticket, items))
    }

    pub async fn update<T: Resource>(&self, id: i32, update: &T::Update) -> Result<T, ClientError> {
        self.put(&format!("{}/{id}", T::PATH), update).await
    }

    /// Flips a student between active and inactive
    ///
    /// Students are never deleted; deactivating one is this status change.
    pub async fn toggle_student_status(
        &self,
        student: &StudentRecord,
    ) -> Result<StudentRecord, ClientError> {
        // anything not active is reactivated
        let status = student
            .student_status
            .parse::<RecordStatus>()
            .unwrap_or(RecordStatus::Inactive)
            .toggled();
        let update = StudentUpdate {
            student_status: Some(status.to_string()),
            ..Default::default()
        };

        let updated = self
            .update::<StudentRecord>(student.student_id, &update)
            .await?;
        log::info!("{} is now {status}", student.display_name());
        Ok(updated)
    }

    pub async fn student_details(&self, student_id: i32) -> Result<StudentRecord, ClientError> {
        self.get(&format!("/students/{student_id}/details"), &[])
            .await
    }

    pub async fn student_grades(
        &self,
        student_id: i32,
        school_year: Option<&str>,
    ) -> Result<Vec<GradeRecord>, ClientError> {
        self.get(
            &format!("/students/{student_id}/grades"),
            &school_year_scope(school_year),
        )
        .await
    }

    pub async fn attendance(
        &self,
        student_id: i32,
        school_year: Option<&str>,
    ) -> Result<AttendanceSummary, ClientError> {
        self.get(
            &format!("/attendance/{student_id}"),
            &school_year_scope(school_year),
        )
        .await
    }

    pub async fn section(&self, section_id: i32) -> Result<SectionDetail, ClientError> {
        self.get(&format!("/sections/{section_id}"), &[]).await
    }

    pub async fn active_school_year(&self) -> Result<SchoolYearRecord, ClientError> {
        self.get("/school-years/active", &[]).await
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, ClientError> {
        self.get("/filters", &[]).await
    }

    pub async fn my_profile(&self) -> Result<StudentRecord, ClientError> {
        self.get("/me/profile", &[]).await
    }

    pub async fn my_grades(&self, school_year: Option<&str>) -> Result<Vec<GradeRecord>, ClientError> {
        self.get("/me/grades", &school_year_scope(school_year))
            .await
    }

    pub async fn my_attendance(
        &self,
        school_year: Option<&str>,
    ) -> Result<Vec<AttendanceEntry>, ClientError> {
        self.get("/me/attendance", &school_year_scope(school_year))
            .await
    }

    pub async fn my_schedule(&self) -> Result<Vec<ScheduleRecord>, ClientError> {
        self.get("/me/schedule", &[]).await
    }

    /// Gathers a student's record, grades and attendance into the export
    ///
    /// Grades and attendance are scoped to the student's current school
    /// year. Only the record itself is required; failing grade or attendance
    /// reads are logged and leave their page out.
    pub async fn export_student(&self, student_id: i32) -> Result<Document, ClientError> {
        let student = self.student_details(student_id).await?;
        let school_year = student.school_year.as_deref();

        let (grades, attendance) = futures::join!(
            self.student_grades(student_id, school_year),
            self.attendance(student_id, school_year),
        );

        let grades = grades.unwrap_or_else(|err| {
            log::warn!("Exporting student {student_id} without grades: {err}");
            Vec::new()
        });
        let attendance = attendance
            .inspect_err(|err| {
                log::warn!("Exporting student {student_id} without attendance: {err}")
            })
            .ok();

        Ok(Document::student_record(
            &student,
            &grades,
            attendance.as_ref(),
        ))
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.session.token().ok_or(ClientError::NotLoggedIn)?;
        Ok(request.bearer_auth(token))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let request = self.authorized(self.http.get(self.url(path)).query(params))?;
        Self::decode(request.send().await?).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(self.http.put(self.url(path)).json(body))?;
        Self::decode(request.send().await?).await
    }

    /// Fails on a non-2xx status, carrying the server's `error` message
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| value.get("error")?.as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(ClientError::Status { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::{get, post, put},
    };
    use models::records::EmployeeRecord;
    use serde_json::json;
    use std::collections::HashMap;

    const TOKEN: &str = "header.claims.signature";

    fn employee(id: i32, lastname: &str, role: &str) -> Value {
        json!({
            "employee_id": id,
            "lastname": lastname,
            "firstname": "Maria",
            "middlename": null,
            "role": role,
            "contact_number": null,
            "address": null,
            "status": "active",
            "year_started": 2015
        })
    }

    async fn login(Json(request): Json<LoginRequest>) -> Json<Value> {
        if request.password == "admin123" {
            Json(json!({ "authenticated": true, "role": "principal", "token": TOKEN }))
        } else {
            Json(json!({ "authenticated": false }))
        }
    }

    async fn employees(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        let expected = format!("Bearer {TOKEN}");
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(&expected) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid or expired token" })),
            );
        }

        let all = vec![
            employee(2, "Santos", "Registrar"),
            employee(1, "Bautista", "Class Adviser"),
        ];
        let matching = all
            .into_iter()
            .filter(|row| params.get("role").is_none_or(|role| row["role"] == **role))
            .collect();
        (StatusCode::OK, Json(Value::Array(matching)))
    }

    fn student(id: i32, status: &str) -> Value {
        json!({
            "student_id": id,
            "lastname": "Reyes",
            "firstname": "Ana",
            "middlename": "Santos",
            "current_yr_lvl": "8",
            "student_status": status,
            "section_name": "Sampaguita",
            "school_year": "2024-2025"
        })
    }

    async fn student_details(Path(id): Path<i32>) -> (StatusCode, Json<Value>) {
        if id == 99 {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "student 99 not found" })),
            );
        }
        (StatusCode::OK, Json(student(id, "active")))
    }

    async fn update_student(Path(id): Path<i32>, Json(update): Json<Value>) -> Json<Value> {
        let status = update["student_status"].as_str().unwrap_or("active");
        Json(student(id, status))
    }

    /// Labels every row with the requested school year
    async fn student_grades(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let school_year = params.get("school_year").cloned();
        Json(json!([{
            "subject_id": 1,
            "subject_name": "English",
            "q1_grade": 85.0,
            "q2_grade": 90.0,
            "q3_grade": 88.0,
            "q4_grade": 92.0,
            "final_grade": 88.75,
            "grade_level": "8",
            "school_year": school_year
        }]))
    }

    async fn attendance_unavailable() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    }

    async fn serve() -> String {
        let router = Router::new()
            .route("/login", post(login))
            .route("/employees", get(employees))
            .route("/students/{id}", put(update_student))
            .route("/students/{id}/details", get(student_details))
            .route("/students/{id}/grades", get(student_grades))
            .route("/attendance/{id}", get(attendance_unavailable));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_login_keeps_session() {
        let mut client = ApiClient::new(serve().await);

        assert_eq!(
            client.login("principal", "admin123").await.unwrap(),
            Some(Role::Principal)
        );
        assert_eq!(client.session().token(), Some(TOKEN));

        assert_eq!(client.login("principal", "wrong").await.unwrap(), None);
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_calls_need_a_session() {
        let client = ApiClient::new(serve().await);

        let result = client.list::<EmployeeRecord>(&FilterSet::new()).await;

        assert!(matches!(result, Err(ClientError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_list_sends_filters() {
        let mut client = ApiClient::new(serve().await);
        client.login("principal", "admin123").await.unwrap();

        let filters = FilterSet::new()
            .with(models::filter::FilterKey::Role, "Registrar")
            .unwrap();
        let employees = client.list::<EmployeeRecord>(&filters).await.unwrap();

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].lastname, "Santos");
    }

    #[tokio::test]
    async fn test_reload_installs_sorted_list() {
        let mut client = ApiClient::new(serve().await);
        client.login("principal", "admin123").await.unwrap();

        let mut view = ListView::<EmployeeRecord>::new();
        assert!(client.reload(&mut view).await.unwrap());

        let names: Vec<_> = view.items().iter().map(|e| e.lastname.as_str()).collect();
        assert_eq!(names, vec!["Bautista", "Santos"]);

        view.set_search("san");
        assert_eq!(view.visible_len(), 1);
    }

    #[tokio::test]
    async fn test_error_status_carries_message() {
        let mut client = ApiClient::new(serve().await);
        client.login("principal", "admin123").await.unwrap();

        let err = client.student_details(99).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error (404 Not Found): student 99 not found");
    }

    #[tokio::test]
    async fn test_export_is_scoped_to_current_school_year() {
        let mut client = ApiClient::new(serve().await);
        client.login("principal", "admin123").await.unwrap();

        let doc = client.export_student(12).await.unwrap();

        // attendance failed, so only the record and the grades remain
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.file_name, "Ana_Reyes_Details.pdf");
        assert_eq!(
            doc.pages[1].table.head[0],
            vec!["Grade Level: 8", "School Year: 2024-2025"]
        );
    }

    #[tokio::test]
    async fn test_export_needs_the_student() {
        let mut client = ApiClient::new(serve().await);
        client.login("principal", "admin123").await.unwrap();

        assert!(client.export_student(99).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_toggle_student_status() {
        let mut client = ApiClient::new(serve().await);
        client.login("principal", "admin123").await.unwrap();

        let active = client.student_details(12).await.unwrap();
        let inactive = client.toggle_student_status(&active).await.unwrap();
        assert_eq!(inactive.student_status, "inactive");

        let reactivated = client.toggle_student_status(&inactive).await.unwrap();
        assert_eq!(reactivated.student_status, "active");
    }
}
