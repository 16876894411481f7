//! Test helpers for inbound HTTP components.
//!
//! In-memory repositories back a fully wired [`HttpState`] so handler tests
//! exercise the real services and routing without a database.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use actix_web::{App, web};
use async_trait::async_trait;

use crate::domain::ports::{
    EnrollmentRepository, EnrollmentRepositoryError, PersonRepository, PersonRepositoryError,
    PilgrimageRepository, PilgrimageRepositoryError,
};
use crate::domain::{
    Enrollment, EnrollmentDraft, EnrollmentStatus, Page, PageRequest, Person, PersonDraft,
    Pilgrimage, PilgrimageDraft, SortSpec,
};
use crate::inbound::http::state::HttpState;

fn page_slice<T: Clone>(rows: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = rows.len() as u64;
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = rows
        .into_iter()
        .skip(start)
        .take(request.size() as usize)
        .collect();
    Page::new(items, request.page(), request.size(), total)
}

/// Person repository backed by a mutex-guarded vector.
#[derive(Default)]
pub struct InMemoryPersonRepository {
    rows: Mutex<Vec<Person>>,
    next_id: AtomicI64,
}

impl InMemoryPersonRepository {
    pub fn seeded(persons: Vec<Person>) -> Self {
        let next = persons.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(persons),
            next_id: AtomicI64::new(next),
        }
    }

    fn sorted(&self, sort: Option<&SortSpec>) -> Vec<Person> {
        let mut rows = self.rows.lock().expect("lock poisoned").clone();
        if let Some(spec) = sort {
            rows.sort_by(|a, b| {
                let ord = match spec.field.as_str() {
                    "firstName" => a.first_name.cmp(&b.first_name),
                    "lastName" => a.last_name.cmp(&b.last_name),
                    "birthDate" => a.birth_date.cmp(&b.birth_date),
                    _ => a.id.cmp(&b.id),
                };
                if spec.direction.is_descending() {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        rows
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, PersonRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Person>, PersonRepositoryError> {
        Ok(page_slice(self.sorted(request.sort()), request))
    }

    async fn create(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).max(1);
        let person = Person::from_draft(id, draft.clone());
        self.rows
            .lock()
            .expect("lock poisoned")
            .push(person.clone());
        Ok(person)
    }

    async fn save(&self, person: &Person) -> Result<Person, PersonRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        if let Some(slot) = rows.iter_mut().find(|p| p.id == person.id) {
            *slot = person.clone();
        } else {
            rows.push(person.clone());
        }
        Ok(person.clone())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, PersonRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().any(|p| p.id == id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PersonRepositoryError> {
        self.rows
            .lock()
            .expect("lock poisoned")
            .retain(|p| p.id != id);
        Ok(())
    }
}

/// Pilgrimage repository backed by a mutex-guarded vector.
#[derive(Default)]
pub struct InMemoryPilgrimageRepository {
    rows: Mutex<Vec<Pilgrimage>>,
    next_id: AtomicI64,
}

impl InMemoryPilgrimageRepository {
    pub fn seeded(pilgrimages: Vec<Pilgrimage>) -> Self {
        let next = pilgrimages.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(pilgrimages),
            next_id: AtomicI64::new(next),
        }
    }

    fn sorted(&self, sort: Option<&SortSpec>) -> Vec<Pilgrimage> {
        let mut rows = self.rows.lock().expect("lock poisoned").clone();
        if let Some(spec) = sort {
            rows.sort_by(|a, b| {
                let ord = match spec.field.as_str() {
                    "name" => a.name.cmp(&b.name),
                    "startDate" => a.start_date.cmp(&b.start_date),
                    "endDate" => a.end_date.cmp(&b.end_date),
                    _ => a.id.cmp(&b.id),
                };
                if spec.direction.is_descending() {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        rows
    }
}

#[async_trait]
impl PilgrimageRepository for InMemoryPilgrimageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Pilgrimage>, PilgrimageRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Pilgrimage>, PilgrimageRepositoryError> {
        Ok(page_slice(self.sorted(request.sort()), request))
    }

    async fn create(
        &self,
        draft: &PilgrimageDraft,
    ) -> Result<Pilgrimage, PilgrimageRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).max(1);
        let pilgrimage = Pilgrimage::from_draft(id, draft.clone());
        self.rows
            .lock()
            .expect("lock poisoned")
            .push(pilgrimage.clone());
        Ok(pilgrimage)
    }

    async fn save(&self, pilgrimage: &Pilgrimage) -> Result<Pilgrimage, PilgrimageRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        if let Some(slot) = rows.iter_mut().find(|p| p.id == pilgrimage.id) {
            *slot = pilgrimage.clone();
        } else {
            rows.push(pilgrimage.clone());
        }
        Ok(pilgrimage.clone())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, PilgrimageRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().any(|p| p.id == id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PilgrimageRepositoryError> {
        self.rows
            .lock()
            .expect("lock poisoned")
            .retain(|p| p.id != id);
        Ok(())
    }
}

/// Enrollment repository backed by a mutex-guarded vector.
#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    rows: Mutex<Vec<Enrollment>>,
    next_id: AtomicI64,
}

impl InMemoryEnrollmentRepository {
    pub fn seeded(enrollments: Vec<Enrollment>) -> Self {
        let next = enrollments.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(enrollments),
            next_id: AtomicI64::new(next),
        }
    }

    fn filtered(&self, keep: impl Fn(&Enrollment) -> bool) -> Vec<Enrollment> {
        let rows = self.rows.lock().expect("lock poisoned");
        rows.iter().filter(|e| keep(e)).cloned().collect()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().find(|e| e.id == id).cloned())
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(page_slice(self.filtered(|_| true), request))
    }

    async fn find_page_by_person(
        &self,
        person_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(page_slice(
            self.filtered(|e| e.person_id == person_id),
            request,
        ))
    }

    async fn find_page_by_pilgrimage(
        &self,
        pilgrimage_id: i64,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(page_slice(
            self.filtered(|e| e.pilgrimage_id == pilgrimage_id),
            request,
        ))
    }

    async fn find_page_by_status(
        &self,
        status: EnrollmentStatus,
        request: &PageRequest,
    ) -> Result<Page<Enrollment>, EnrollmentRepositoryError> {
        Ok(page_slice(self.filtered(|e| e.status == status), request))
    }

    async fn exists_for_person_and_pilgrimage(
        &self,
        person_id: i64,
        pilgrimage_id: i64,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows
            .iter()
            .any(|e| e.person_id == person_id && e.pilgrimage_id == pilgrimage_id))
    }

    async fn create(
        &self,
        draft: &EnrollmentDraft,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).max(1);
        let enrollment = Enrollment::from_draft(id, draft.clone());
        self.rows
            .lock()
            .expect("lock poisoned")
            .push(enrollment.clone());
        Ok(enrollment)
    }

    async fn save(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut rows = self.rows.lock().expect("lock poisoned");
        if let Some(slot) = rows.iter_mut().find(|e| e.id == enrollment.id) {
            *slot = enrollment.clone();
        } else {
            rows.push(enrollment.clone());
        }
        Ok(enrollment.clone())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, EnrollmentRepositoryError> {
        let rows = self.rows.lock().expect("lock poisoned");
        Ok(rows.iter().any(|e| e.id == id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), EnrollmentRepositoryError> {
        self.rows
            .lock()
            .expect("lock poisoned")
            .retain(|e| e.id != id);
        Ok(())
    }
}

/// State wired over in-memory repositories seeded with persons only.
pub async fn seeded_state(persons: Vec<Person>) -> web::Data<HttpState> {
    seeded_state_full(persons, Vec::new(), Vec::new()).await
}

/// State wired over in-memory repositories seeded with all three entity
/// kinds.
pub async fn seeded_state_full(
    persons: Vec<Person>,
    pilgrimages: Vec<Pilgrimage>,
    enrollments: Vec<Enrollment>,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(InMemoryPersonRepository::seeded(persons)),
        Arc::new(InMemoryPilgrimageRepository::seeded(pilgrimages)),
        Arc::new(InMemoryEnrollmentRepository::seeded(enrollments)),
    ))
}

/// Application with the full route table and the given state.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(crate::inbound::http::configure)
}
