use crate::scheduling::{distance::Coordinates, draft::WorkshopSnapshot, locator::Located};

#[derive(Queryable, Clone, Debug)]
pub struct WorkshopData {
    pub id: u64,
    pub nome: String,
    pub endereco: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub telefone: String,
    pub horario_abertura: String,
    pub horario_fechamento: String,
    pub dias_funcionamento: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl WorkshopData {
    pub fn full_address(&self) -> String {
        format!(
            "{} - {}/{} - CEP {}",
            self.endereco, self.cidade, self.estado, self.cep
        )
    }

    pub fn snapshot(&self) -> WorkshopSnapshot {
        WorkshopSnapshot {
            id: self.id,
            nome: self.nome.clone(),
            endereco: self.full_address(),
            telefone: self.telefone.clone(),
        }
    }
}

impl Located for WorkshopData {
    fn coordinates(&self) -> Option<Coordinates> {
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lng)) => Coordinates::parse(lat, lng),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop(lat: Option<&str>, lng: Option<&str>) -> WorkshopData {
        WorkshopData {
            id: 1,
            nome: "OilSmart Liberdade".to_string(),
            endereco: "Rua da Glória, 200".to_string(),
            cidade: "São Paulo".to_string(),
            estado: "SP".to_string(),
            cep: "01510-000".to_string(),
            telefone: "(11) 3207-1000".to_string(),
            horario_abertura: "08:00".to_string(),
            horario_fechamento: "18:00".to_string(),
            dias_funcionamento: "seg-sab".to_string(),
            latitude: lat.map(str::to_string),
            longitude: lng.map(str::to_string),
        }
    }

    #[test]
    fn text_coordinates_are_coerced() {
        let w = workshop(Some("-23.5580"), Some("-46.6350"));
        let c = w.coordinates().unwrap();
        assert_eq!(c.lat, -23.558);
        assert!(workshop(None, Some("-46.6")).coordinates().is_none());
        assert!(workshop(Some("x"), Some("y")).coordinates().is_none());
    }

    #[test]
    fn snapshot_denormalizes_address() {
        let snap = workshop(None, None).snapshot();
        assert_eq!(snap.endereco, "Rua da Glória, 200 - São Paulo/SP - CEP 01510-000");
        assert_eq!(snap.telefone, "(11) 3207-1000");
    }
}
