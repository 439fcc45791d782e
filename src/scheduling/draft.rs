use chrono::{NaiveDateTime, NaiveTime};

use super::{
    catalog::{select_products, ProductItem, ProductSelection, Recommendation},
    distance::Coordinates,
};
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone, Debug, PartialEq)]
pub struct WorkshopSnapshot {
    pub id: u64,
    pub nome: String,
    pub endereco: String,
    pub telefone: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomerContact {
    pub nome: String,
    pub cpf: Option<String>,
    pub telefone: String,
    pub email: String,
}

impl CustomerContact {
    /// Trims every field, keeps only CPF digits and checks the required ones.
    pub fn validated(self) -> ServiceResult<Self> {
        let nome = self.nome.trim().to_string();
        let telefone = self.telefone.trim().to_string();
        let email = self.email.trim().to_lowercase();

        if nome.is_empty() {
            return Err(ServiceError::validation("Nome do cliente é obrigatório"));
        }
        if telefone.is_empty() {
            return Err(ServiceError::validation("Telefone do cliente é obrigatório"));
        }
        if !crate::utils::is_valid_email(&email) {
            return Err(ServiceError::validation("E-mail do cliente inválido"));
        }

        let cpf = match self.cpf {
            Some(cpf) if !cpf.trim().is_empty() => {
                let digits: String = cpf.chars().filter(|c| c.is_ascii_digit()).collect();
                if digits.len() != 11 {
                    return Err(ServiceError::validation("CPF deve ter 11 dígitos"));
                }
                Some(digits)
            }
            _ => None,
        };

        Ok(Self {
            nome,
            cpf,
            telefone,
            email,
        })
    }
}

/// Booking ready to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBooking {
    pub vehicle: String,
    pub products: Vec<ProductItem>,
    pub location: Option<Coordinates>,
    pub workshop: WorkshopSnapshot,
    pub data_hora: NaiveDateTime,
    pub customer: CustomerContact,
}

impl NewBooking {
    pub fn services_description(&self) -> String {
        self.products
            .iter()
            .map(|p| p.nome.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    pub fn total(&self) -> f64 {
        self.products.iter().map(|p| p.preco).sum()
    }
}

/// Wizard state. Every step takes the draft by value and hands back a new one,
/// so an invalid step leaves the caller's previous draft untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingDraft {
    vehicle: Option<String>,
    products: Option<Vec<ProductItem>>,
    location: Option<Coordinates>,
    workshop: Option<WorkshopSnapshot>,
    data_hora: Option<NaiveDateTime>,
    customer: Option<CustomerContact>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle<S: AsRef<str>>(self, description: S) -> ServiceResult<Self> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(ServiceError::validation("Informe o veículo"));
        }
        Ok(Self {
            vehicle: Some(description.to_string()),
            ..self
        })
    }

    pub fn with_products(
        self,
        recommendation: &Recommendation,
        selection: ProductSelection,
    ) -> ServiceResult<Self> {
        if self.vehicle.is_none() {
            return Err(ServiceError::validation("Informe o veículo antes dos produtos"));
        }
        let products = select_products(recommendation, selection)?;
        Ok(Self {
            products: Some(products),
            ..self
        })
    }

    pub fn with_location(self, location: Coordinates) -> Self {
        Self {
            location: Some(location),
            ..self
        }
    }

    pub fn with_workshop(self, workshop: WorkshopSnapshot) -> ServiceResult<Self> {
        if self.products.is_none() {
            return Err(ServiceError::validation("Selecione os produtos antes da oficina"));
        }
        Ok(Self {
            workshop: Some(workshop),
            data_hora: None,
            ..self
        })
    }

    /// `offered` is what the slot generator returned for that workshop and day.
    pub fn with_slot(self, data_hora: NaiveDateTime, offered: &[NaiveTime]) -> ServiceResult<Self> {
        if self.workshop.is_none() {
            return Err(ServiceError::validation("Selecione a oficina antes do horário"));
        }
        if !offered.contains(&data_hora.time()) {
            return Err(ServiceError::conflict("Horário indisponível para esta oficina"));
        }
        Ok(Self {
            data_hora: Some(data_hora),
            ..self
        })
    }

    pub fn with_customer(self, customer: CustomerContact) -> ServiceResult<Self> {
        let customer = customer.validated()?;
        Ok(Self {
            customer: Some(customer),
            ..self
        })
    }

    pub fn finish(self) -> ServiceResult<NewBooking> {
        let missing = |what: &str| ServiceError::validation(format!("Agendamento incompleto: {}", what));
        Ok(NewBooking {
            vehicle: self.vehicle.ok_or_else(|| missing("veículo"))?,
            products: self.products.ok_or_else(|| missing("produtos"))?,
            location: self.location,
            workshop: self.workshop.ok_or_else(|| missing("oficina"))?,
            data_hora: self.data_hora.ok_or_else(|| missing("data e horário"))?,
            customer: self.customer.ok_or_else(|| missing("dados do cliente"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::catalog::generic_recommendation;
    use chrono::NaiveDate;

    fn workshop() -> WorkshopSnapshot {
        WorkshopSnapshot {
            id: 7,
            nome: "Auto Center Sé".to_string(),
            endereco: "Praça da Sé, 100 - São Paulo/SP".to_string(),
            telefone: "(11) 3333-4444".to_string(),
        }
    }

    fn customer() -> CustomerContact {
        CustomerContact {
            nome: " Ana Souza ".to_string(),
            cpf: Some("123.456.789-09".to_string()),
            telefone: "(11) 98888-7777".to_string(),
            email: "Ana@Example.com".to_string(),
        }
    }

    fn slot() -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 6, 1).and_hms(9, 0, 0)
    }

    fn offered() -> Vec<NaiveTime> {
        vec![NaiveTime::from_hms(8, 0, 0), NaiveTime::from_hms(9, 0, 0)]
    }

    fn both() -> ProductSelection {
        ProductSelection { oleo: true, filtro: true }
    }

    #[test]
    fn full_wizard_produces_booking() {
        let booking = BookingDraft::new()
            .with_vehicle("Volkswagen Gol 2020")
            .and_then(|d| d.with_products(&generic_recommendation(), both()))
            .map(|d| d.with_location(Coordinates::new(-23.55, -46.63).unwrap()))
            .and_then(|d| d.with_workshop(workshop()))
            .and_then(|d| d.with_slot(slot(), &offered()))
            .and_then(|d| d.with_customer(customer()))
            .and_then(BookingDraft::finish)
            .unwrap();

        assert_eq!(booking.total(), 70.0);
        assert_eq!(
            booking.services_description(),
            "Óleo sintético 5W-30 (genérico) + Filtro de óleo (genérico)"
        );
        assert_eq!(booking.customer.nome, "Ana Souza");
        assert_eq!(booking.customer.email, "ana@example.com");
        assert_eq!(booking.customer.cpf.as_deref(), Some("12345678909"));
    }

    #[test]
    fn empty_product_selection_is_rejected() {
        let res = BookingDraft::new()
            .with_vehicle("Gol")
            .and_then(|d| d.with_products(&generic_recommendation(), ProductSelection::default()));
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn slot_must_be_offered() {
        let draft = BookingDraft::new()
            .with_vehicle("Gol")
            .and_then(|d| d.with_products(&generic_recommendation(), both()))
            .and_then(|d| d.with_workshop(workshop()))
            .unwrap();
        let taken = NaiveDate::from_ymd(2026, 6, 1).and_hms(10, 0, 0);
        assert!(matches!(
            draft.with_slot(taken, &offered()),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn steps_out_of_order_are_rejected() {
        assert!(BookingDraft::new()
            .with_products(&generic_recommendation(), both())
            .is_err());
        assert!(BookingDraft::new().with_slot(slot(), &offered()).is_err());
    }

    #[test]
    fn changing_workshop_clears_slot() {
        let draft = BookingDraft::new()
            .with_vehicle("Gol")
            .and_then(|d| d.with_products(&generic_recommendation(), both()))
            .and_then(|d| d.with_workshop(workshop()))
            .and_then(|d| d.with_slot(slot(), &offered()))
            .and_then(|d| d.with_workshop(workshop()))
            .and_then(|d| d.with_customer(customer()))
            .unwrap();
        assert!(draft.finish().is_err());
    }

    #[test]
    fn customer_validation() {
        let mut c = customer();
        c.email = "sem-arroba".to_string();
        assert!(c.validated().is_err());

        let mut c = customer();
        c.telefone = "  ".to_string();
        assert!(c.validated().is_err());

        let mut c = customer();
        c.cpf = Some("123".to_string());
        assert!(c.validated().is_err());

        let mut c = customer();
        c.cpf = Some("".to_string());
        assert_eq!(c.validated().unwrap().cpf, None);
    }
}
