//! In-memory record store.
//!
//! Tables live behind one `RwLock`, so a booking and its segments and
//! travelers change together: a reader either sees the segment set from
//! before a replacement or the one after it, never a half-written mix.

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{
    Booking, BookingBundle, BookingDraft, Person, Segment, SegmentDraft, TravelerBooking,
    TravelerDetail, TravelerDraft, TravelerStatus, TravelerUpdate, DEFAULT_SEGMENT_GROUP,
};
use crate::services::itinerary;

/// Newest-first booking listings stop after this many bookings.
const BOOKING_LIST_CAP: usize = 200;

/// Optional free text is stored trimmed, with blanks collapsed to absent.
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("a person with that name already exists")]
    DuplicateName,
}

#[derive(Default)]
struct Tables {
    people: BTreeMap<i64, Person>,
    bookings: BTreeMap<i64, Booking>,
    segments: BTreeMap<i64, Segment>,
    travelers: BTreeMap<i64, TravelerBooking>,
    next_person_id: i64,
    next_booking_id: i64,
    next_segment_id: i64,
    next_traveler_id: i64,
}

impl Tables {
    fn segments_of(&self, booking_id: i64) -> Vec<Segment> {
        self.segments
            .values()
            .filter(|s| s.booking_id == booking_id)
            .cloned()
            .collect()
    }

    fn travelers_of(&self, booking_id: i64) -> Vec<TravelerDetail> {
        let mut travelers: Vec<TravelerDetail> = self
            .travelers
            .values()
            .filter(|t| t.booking_id == booking_id)
            .map(|t| TravelerDetail {
                id: t.id,
                person_id: t.person_id,
                name: self
                    .people
                    .get(&t.person_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                pnr: t.pnr.clone(),
                category: t.category.clone(),
                reason: t.reason.clone(),
                status: t.status,
                refund_method: t.refund_method.clone(),
                refund_notes: t.refund_notes.clone(),
            })
            .collect();
        travelers.sort_by(|a, b| a.name.cmp(&b.name));
        travelers
    }

    fn bundle(&self, booking: &Booking) -> BookingBundle {
        let mut segments = self.segments_of(booking.id);
        itinerary::sort_chronologically(&mut segments);
        BookingBundle {
            booking: booking.clone(),
            segments,
            travelers: self.travelers_of(booking.id),
        }
    }

    fn insert_segment(&mut self, booking_id: i64, draft: &SegmentDraft) {
        self.next_segment_id += 1;
        let group = draft
            .segment_group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_SEGMENT_GROUP);
        self.segments.insert(
            self.next_segment_id,
            Segment {
                id: self.next_segment_id,
                booking_id,
                flight_number: draft.flight_number.clone(),
                flight_date: draft.flight_date.clone(),
                origin: clean(&draft.origin),
                destination: clean(&draft.destination),
                sched_departure: clean(&draft.sched_departure),
                sched_arrival: clean(&draft.sched_arrival),
                airline: clean(&draft.airline),
                aircraft_type: clean(&draft.aircraft_type),
                segment_group: Some(group.to_string()),
            },
        );
    }

    fn apply_booking_draft(booking: &mut Booking, draft: &BookingDraft) {
        booking.booking_type = draft.booking_type;
        booking.payment_type = draft.payment_type;
        booking.cost_cash = draft.cost_cash;
        booking.cost_miles = draft.cost_miles;
        booking.fees = draft.fees;
        booking.currency = draft.normalized_currency();
        booking.fare_class = clean(&draft.fare_class);
        booking.secondary_class = clean(&draft.secondary_class);
        booking.ticket_end = clean(&draft.ticket_end);
        booking.issued_on = draft.issued_on;
    }
}

/// Shared handle to all record tables.
#[derive(Default)]
pub struct RecordStore {
    inner: RwLock<Tables>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// People ordered active-first, then by name.
    pub async fn list_people(&self) -> Vec<Person> {
        let tables = self.inner.read().await;
        let mut people: Vec<Person> = tables.people.values().cloned().collect();
        people.sort_by(|a, b| b.active.cmp(&a.active).then_with(|| a.name.cmp(&b.name)));
        people
    }

    /// Adds a person. Names are unique; people are never removed, only
    /// deactivated.
    pub async fn create_person(&self, name: &str) -> Result<Person, StoreError> {
        let mut tables = self.inner.write().await;
        if tables.people.values().any(|p| p.name == name) {
            return Err(StoreError::DuplicateName);
        }
        tables.next_person_id += 1;
        let person = Person {
            id: tables.next_person_id,
            name: name.to_string(),
            active: true,
        };
        tables.people.insert(person.id, person.clone());
        Ok(person)
    }

    pub async fn set_person_active(&self, id: i64, active: bool) -> Result<Person, StoreError> {
        let mut tables = self.inner.write().await;
        let person = tables
            .people
            .get_mut(&id)
            .ok_or(StoreError::NotFound("person"))?;
        person.active = active;
        Ok(person.clone())
    }

    /// Creates a booking with its segments and travelers in one step.
    /// Returns the new booking id.
    pub async fn create_booking(
        &self,
        draft: &BookingDraft,
        segments: &[SegmentDraft],
        travelers: &[TravelerDraft],
    ) -> Result<i64, StoreError> {
        let mut tables = self.inner.write().await;
        for traveler in travelers {
            if !tables.people.contains_key(&traveler.person_id) {
                return Err(StoreError::NotFound("person"));
            }
        }

        tables.next_booking_id += 1;
        let booking_id = tables.next_booking_id;
        let mut booking = Booking {
            id: booking_id,
            booking_type: draft.booking_type,
            payment_type: draft.payment_type,
            cost_cash: None,
            cost_miles: None,
            fees: None,
            currency: String::new(),
            fare_class: None,
            secondary_class: None,
            ticket_end: None,
            issued_on: None,
        };
        Tables::apply_booking_draft(&mut booking, draft);
        tables.bookings.insert(booking_id, booking);

        for segment in segments {
            tables.insert_segment(booking_id, segment);
        }
        for traveler in travelers {
            tables.next_traveler_id += 1;
            let id = tables.next_traveler_id;
            tables.travelers.insert(
                id,
                TravelerBooking {
                    id,
                    booking_id,
                    person_id: traveler.person_id,
                    pnr: traveler.pnr.clone(),
                    category: traveler.category.clone(),
                    reason: traveler.reason.clone(),
                    status: TravelerStatus::Active,
                    refund_method: None,
                    refund_notes: None,
                },
            );
        }
        Ok(booking_id)
    }

    /// One booking with its segments (chronological) and travelers
    /// (by name), ready for the detail view or aggregation.
    pub async fn get_bundle(&self, id: i64) -> Result<BookingBundle, StoreError> {
        let tables = self.inner.read().await;
        let booking = tables
            .bookings
            .get(&id)
            .ok_or(StoreError::NotFound("booking"))?;
        Ok(tables.bundle(booking))
    }

    /// Bundles for the overview views, newest booking first, capped at
    /// the listing limit.
    pub async fn list_bundles(&self) -> Vec<BookingBundle> {
        let tables = self.inner.read().await;
        tables
            .bookings
            .values()
            .rev()
            .take(BOOKING_LIST_CAP)
            .map(|b| tables.bundle(b))
            .collect()
    }

    /// Every bundle, newest booking first. Reporting reads the full
    /// history; only the overview views cap.
    pub async fn all_bundles(&self) -> Vec<BookingBundle> {
        let tables = self.inner.read().await;
        tables
            .bookings
            .values()
            .rev()
            .map(|b| tables.bundle(b))
            .collect()
    }

    /// Rewrites a booking's fields and replaces its whole segment set.
    /// Travelers are untouched by edits.
    pub async fn update_booking(
        &self,
        id: i64,
        draft: &BookingDraft,
        segments: &[SegmentDraft],
    ) -> Result<(), StoreError> {
        let mut tables = self.inner.write().await;
        let mut booking = tables
            .bookings
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("booking"))?;
        Tables::apply_booking_draft(&mut booking, draft);
        tables.bookings.insert(id, booking);

        tables.segments.retain(|_, s| s.booking_id != id);
        for segment in segments {
            tables.insert_segment(id, segment);
        }
        Ok(())
    }

    /// Removes a booking along with its segments and travelers.
    pub async fn delete_booking(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.inner.write().await;
        if tables.bookings.remove(&id).is_none() {
            return Err(StoreError::NotFound("booking"));
        }
        tables.segments.retain(|_, s| s.booking_id != id);
        tables.travelers.retain(|_, t| t.booking_id != id);
        Ok(())
    }

    /// Edits a traveler's PNR, trip metadata, and refund notes.
    pub async fn update_traveler(&self, id: i64, update: &TravelerUpdate) -> Result<(), StoreError> {
        let mut tables = self.inner.write().await;
        let traveler = tables
            .travelers
            .get_mut(&id)
            .ok_or(StoreError::NotFound("traveler"))?;
        traveler.pnr = update.pnr.clone();
        traveler.category = update.category.clone();
        traveler.reason = update.reason.clone();
        traveler.refund_method = update.refund_method.clone();
        traveler.refund_notes = update.refund_notes.clone();
        Ok(())
    }

    /// Flips a traveler's status. Canceling records the refund method
    /// when one is given; reactivating leaves refund fields as they
    /// were.
    pub async fn set_traveler_status(
        &self,
        id: i64,
        status: TravelerStatus,
        refund_method: Option<String>,
    ) -> Result<(), StoreError> {
        let mut tables = self.inner.write().await;
        let traveler = tables
            .travelers
            .get_mut(&id)
            .ok_or(StoreError::NotFound("traveler"))?;
        traveler.status = status;
        if status == TravelerStatus::Canceled {
            if let Some(method) = refund_method {
                traveler.refund_method = Some(method);
            }
        }
        Ok(())
    }
}
