use chrono::NaiveDate;
use std::str::FromStr;

use crate::datetime::end_time_after;
use crate::models::EventPayload;

const DRAFT_START_TIME: &str = "09:00";
const DRAFT_END_TIME: &str = "10:00";

/// Editable fields of the create and detail forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Nombre,
    Fecha,
    HoraInicio,
    HoraFin,
    Lugar,
    TipoActividad,
    Empresa,
    Disertantes,
    Descripcion,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "nombre" => FormField::Nombre,
            "fecha" => FormField::Fecha,
            "hora_inicio" => FormField::HoraInicio,
            "hora_fin" => FormField::HoraFin,
            "lugar" => FormField::Lugar,
            "tipo_actividad" => FormField::TipoActividad,
            "empresa" => FormField::Empresa,
            "disertantes" => FormField::Disertantes,
            "descripcion" => FormField::Descripcion,
            other => return Err(format!("unknown form field {other:?}")),
        })
    }
}

/// Form contents, kept as the raw strings the inputs hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub nombre: String,
    pub fecha: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub lugar: String,
    pub tipo_actividad: String,
    pub empresa: String,
    pub disertantes: String,
    pub descripcion: String,
}

impl EventForm {
    /// Blank draft for `today`, nine to ten.
    pub fn draft(today: NaiveDate) -> Self {
        EventForm {
            fecha: today.format("%Y-%m-%d").to_string(),
            hora_inicio: DRAFT_START_TIME.to_string(),
            hora_fin: DRAFT_END_TIME.to_string(),
            ..Default::default()
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Nombre => &mut self.nombre,
            FormField::Fecha => &mut self.fecha,
            FormField::HoraInicio => &mut self.hora_inicio,
            FormField::HoraFin => &mut self.hora_fin,
            FormField::Lugar => &mut self.lugar,
            FormField::TipoActividad => &mut self.tipo_actividad,
            FormField::Empresa => &mut self.empresa,
            FormField::Disertantes => &mut self.disertantes,
            FormField::Descripcion => &mut self.descripcion,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Moves the end time to half an hour after the start when it is not
    /// already later. Returns whether the form changed.
    pub fn enforce_end_after_start(&mut self) -> bool {
        match end_time_after(&self.hora_inicio, &self.hora_fin) {
            Some(end) => {
                self.hora_fin = end;
                true
            }
            None => false,
        }
    }

    /// Request body for this form. Blank times are left out so the server
    /// applies its defaults.
    pub fn to_payload(&self) -> EventPayload {
        let time = |t: &str| Some(t.to_string()).filter(|t| !t.is_empty());
        EventPayload {
            nombre: Some(self.nombre.clone()),
            fecha: Some(self.fecha.clone()),
            hora_inicio: time(&self.hora_inicio),
            hora_fin: time(&self.hora_fin),
            lugar: Some(self.lugar.clone()),
            tipo_actividad: Some(self.tipo_actividad.clone()),
            empresa: Some(self.empresa.clone()),
            disertantes: Some(self.disertantes.clone()),
            descripcion: Some(self.descripcion.clone()),
        }
    }
}
