//! Client-side state of the calendar screen: the loaded events, the create
//! and detail forms, which modal is open, the view granularity and the
//! focused date. Every successful write bumps the refresh counter and the
//! event list is reloaded from the API in full.

pub mod boundary;
pub mod form;
pub mod layout;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::client::{ApiClient, ApiError};
use crate::datetime::{date_part, format_time, DisplayInterval, END_BEFORE_START_WARNING};
use crate::models::Event;

pub use boundary::{guard, Rendered, FALLBACK_MESSAGE};
pub use form::{EventForm, FormField};
pub use layout::{ViewKind, VisibleRange};

pub const CREATED_NOTICE: &str = "Evento creado exitosamente";
pub const UPDATED_NOTICE: &str = "Evento actualizado exitosamente";
pub const DELETED_NOTICE: &str = "Evento eliminado exitosamente";
pub const NO_EVENTS_IN_RANGE: &str = "No hay eventos en este rango";
const ALL_DAY_LABEL: &str = "Todo el día";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Error al cargar los eventos. Por favor, recarga la página.")]
    Load(#[source] ApiError),
    #[error("Error al crear el evento. Por favor, intenta de nuevo.")]
    Create(#[source] ApiError),
    #[error("Error al actualizar el evento. Por favor, intenta de nuevo.")]
    Update(#[source] ApiError),
    #[error("Error al eliminar el evento. Por favor, intenta de nuevo.")]
    Delete(#[source] ApiError),
    #[error("No hay ningún evento seleccionado")]
    NoSelection,
    #[error("El evento {0} no está en el calendario")]
    UnknownEvent(i64),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot lay out the {0:?} view around {1}")]
    OutOfRange(ViewKind, NaiveDate),
}

/// A stored event placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub interval: DisplayInterval,
    pub record: Event,
}

impl CalendarEvent {
    pub fn from_record(record: Event) -> Self {
        let interval = DisplayInterval::for_event(&record);
        CalendarEvent {
            id: record.id,
            title: record.nombre.clone(),
            interval,
            record,
        }
    }

    /// Edit form pre-filled from the record; missing times are read back
    /// from the display interval.
    pub fn edit_form(&self) -> EventForm {
        let time_or = |stored: &Option<String>, shown| match stored.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format_time(shown),
        };
        let r = &self.record;
        EventForm {
            nombre: r.nombre.clone(),
            fecha: date_part(&r.fecha).to_string(),
            hora_inicio: time_or(&r.hora_inicio, self.interval.start),
            hora_fin: time_or(&r.hora_fin, self.interval.end),
            lugar: r.lugar.clone(),
            tipo_actividad: r.tipo_actividad.clone(),
            empresa: r.empresa.clone(),
            disertantes: r.disertantes.clone(),
            descripcion: r.descripcion.clone(),
        }
    }
}

/// The event open in the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEvent {
    pub id: i64,
    pub form: EventForm,
}

pub struct CalendarView {
    client: ApiClient,
    events: Vec<CalendarEvent>,
    draft: EventForm,
    selected: Option<SelectedEvent>,
    show_create: bool,
    show_details: bool,
    refresh_counter: u64,
    loaded_generation: Option<u64>,
    view: ViewKind,
    date: NaiveDate,
    is_loading: bool,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl CalendarView {
    pub fn new(client: ApiClient) -> Self {
        Self::focused_on(client, today())
    }

    pub fn focused_on(client: ApiClient, date: NaiveDate) -> Self {
        CalendarView {
            client,
            events: Vec::new(),
            draft: EventForm::draft(today()),
            selected: None,
            show_create: false,
            show_details: false,
            refresh_counter: 0,
            loaded_generation: None,
            view: ViewKind::default(),
            date,
            is_loading: false,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn draft(&self) -> &EventForm {
        &self.draft
    }

    pub fn selected(&self) -> Option<&SelectedEvent> {
        self.selected.as_ref()
    }

    pub fn is_create_open(&self) -> bool {
        self.show_create
    }

    pub fn is_details_open(&self) -> bool {
        self.show_details
    }

    pub fn refresh_counter(&self) -> u64 {
        self.refresh_counter
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Reloads the event list if the refresh counter moved since the last
    /// successful load. Returns whether a reload happened.
    pub async fn sync(&mut self) -> Result<bool, ViewError> {
        if self.loaded_generation == Some(self.refresh_counter) {
            return Ok(false);
        }
        let generation = self.refresh_counter;
        debug!("Loading events, refresh counter {}", generation);

        self.is_loading = true;
        let result = self.client.list_events().await;
        self.is_loading = false;

        let records = result.map_err(|e| {
            error!("Failed to load events: {}", e);
            ViewError::Load(e)
        })?;
        self.events = records.into_iter().map(CalendarEvent::from_record).collect();
        self.loaded_generation = Some(generation);
        debug!("Calendar now shows {} events", self.events.len());
        Ok(true)
    }

    /// Forces a full reload.
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        self.refresh_counter += 1;
        self.sync().await.map(|_| ())
    }

    pub fn open_create(&mut self) {
        self.show_create = true;
    }

    pub fn close_create(&mut self) {
        self.show_create = false;
    }

    pub fn set_draft_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub async fn submit_create(&mut self) -> Result<&'static str, ViewError> {
        let payload = self.draft.to_payload();
        debug!("Submitting new event: {:?}", payload);

        self.is_loading = true;
        let result = self.client.create_event(&payload).await;
        self.is_loading = false;

        let created = result.map_err(|e| {
            error!("Failed to create event: {}", e);
            ViewError::Create(e)
        })?;
        info!("Event {} created", created.id);

        self.draft = EventForm::draft(today());
        self.show_create = false;
        self.refresh().await?;
        Ok(CREATED_NOTICE)
    }

    /// Opens the detail modal for event `id` with its edit form filled in.
    pub fn select_event(&mut self, id: i64) -> Result<&SelectedEvent, ViewError> {
        let event = self
            .events
            .iter()
            .find(|e| e.id == id)
            .ok_or(ViewError::UnknownEvent(id))?;
        debug!("Selected event {}: {}", event.id, event.title);

        let selected = SelectedEvent {
            id,
            form: event.edit_form(),
        };
        self.show_details = true;
        let selected: &SelectedEvent = self.selected.insert(selected);
        Ok(selected)
    }

    pub fn set_selected_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), ViewError> {
        let selected = self.selected.as_mut().ok_or(ViewError::NoSelection)?;
        selected.form.set(field, value);
        Ok(())
    }

    pub fn close_details(&mut self) {
        self.show_details = false;
        self.selected = None;
    }

    pub async fn submit_update(&mut self) -> Result<&'static str, ViewError> {
        let selected = self.selected.as_ref().ok_or(ViewError::NoSelection)?;
        let id = selected.id;
        let payload = selected.form.to_payload();

        self.is_loading = true;
        let result = self.client.update_event(id, &payload).await;
        self.is_loading = false;

        result.map_err(|e| {
            error!("Failed to update event {}: {}", id, e);
            ViewError::Update(e)
        })?;
        info!("Event {} updated", id);

        self.close_details();
        self.refresh().await?;
        Ok(UPDATED_NOTICE)
    }

    /// Deletes the selected event. Asking the user for confirmation is the
    /// caller's job.
    pub async fn delete_selected(&mut self) -> Result<&'static str, ViewError> {
        let id = self.selected.as_ref().ok_or(ViewError::NoSelection)?.id;

        self.is_loading = true;
        let result = self.client.delete_event(id).await;
        self.is_loading = false;

        result.map_err(|e| {
            error!("Failed to delete event {}: {}", id, e);
            ViewError::Delete(e)
        })?;
        info!("Event {} deleted", id);

        self.close_details();
        self.refresh().await?;
        Ok(DELETED_NOTICE)
    }

    /// Applies the end-after-start rule to both forms. Returns the warning
    /// to show when either one was adjusted.
    pub fn check_times(&mut self) -> Option<&'static str> {
        let mut adjusted = self.draft.enforce_end_after_start();
        if let Some(selected) = self.selected.as_mut() {
            adjusted |= selected.form.enforce_end_after_start();
        }
        if adjusted {
            warn!("End time was not after start time, moved it");
            return Some(END_BEFORE_START_WARNING);
        }
        None
    }

    pub fn set_view(&mut self, view: ViewKind) {
        self.view = view;
    }

    pub fn navigate_to(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn visible_range(&self) -> Result<VisibleRange, RenderError> {
        VisibleRange::for_view(self.view, self.date)
            .ok_or(RenderError::OutOfRange(self.view, self.date))
    }

    /// Events intersecting the visible range, earliest first.
    pub fn visible_events(&self) -> Result<Vec<&CalendarEvent>, RenderError> {
        let range = self.visible_range()?;
        let mut visible: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|e| range.overlaps(&e.interval))
            .collect();
        visible.sort_by_key(|e| (e.interval.start, e.id));
        Ok(visible)
    }

    /// Agenda lines for the current view, or the fallback if layout fails.
    pub fn render(&self) -> Rendered<Vec<String>> {
        guard(|| self.agenda_lines())
    }

    fn agenda_lines(&self) -> Result<Vec<String>, RenderError> {
        let visible = self.visible_events()?;
        if visible.is_empty() {
            return Ok(vec![NO_EVENTS_IN_RANGE.to_string()]);
        }
        Ok(visible.into_iter().map(agenda_line).collect())
    }
}

fn agenda_line(event: &CalendarEvent) -> String {
    let when = if event.interval.all_day {
        ALL_DAY_LABEL.to_string()
    } else {
        format!(
            "{} - {}",
            format_time(event.interval.start),
            format_time(event.interval.end)
        )
    };
    format!(
        "{} {} {} ({})",
        event.interval.start.format("%d/%m/%Y"),
        when,
        event.title,
        event.record.lugar
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, fecha: &str, inicio: Option<&str>, fin: Option<&str>) -> Event {
        Event {
            id,
            nombre: format!("Evento {id}"),
            fecha: fecha.into(),
            hora_inicio: inicio.map(Into::into),
            hora_fin: fin.map(Into::into),
            lugar: "Hall".into(),
            tipo_actividad: "Charla".into(),
            empresa: "ACME".into(),
            disertantes: "Jane".into(),
            descripcion: "desc".into(),
        }
    }

    #[test]
    fn edit_form_rederives_missing_times() {
        let event = CalendarEvent::from_record(record(3, "2024-05-01T00:00:00", None, Some("")));
        let form = event.edit_form();
        assert_eq!(form.fecha, "2024-05-01");
        assert_eq!(form.hora_inicio, "00:00");
        assert_eq!(form.hora_fin, "23:59");
    }

    #[test]
    fn edit_form_keeps_stored_times() {
        let event =
            CalendarEvent::from_record(record(3, "2024-05-01", Some("09:00"), Some("10:00")));
        let form = event.edit_form();
        assert_eq!(form.hora_inicio, "09:00");
        assert_eq!(form.hora_fin, "10:00");
    }

    #[test]
    fn agenda_line_marks_all_day_events() {
        let all_day = CalendarEvent::from_record(record(1, "2024-05-01", None, None));
        assert_eq!(agenda_line(&all_day), "01/05/2024 Todo el día Evento 1 (Hall)");

        let timed = CalendarEvent::from_record(record(2, "2024-05-01", Some("09:00"), Some("10:00")));
        assert_eq!(agenda_line(&timed), "01/05/2024 09:00 - 10:00 Evento 2 (Hall)");
    }
}
