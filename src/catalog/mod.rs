mod requests;
mod responses;

use crate::{
    database::{self, assert},
    error::{ServiceError, ServiceResult},
    models::{
        brands::BrandData, model_years::ModelYearData, products::ProductData,
        recommendations::RecommendationData, vehicle_models::VehicleModelData,
    },
    protocol::DataResponse,
    scheduling::catalog::{ProductItem, Recommendation},
    AppState,
};
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_brands)
        .service(list_models)
        .service(list_model_years)
        .service(get_recommendation);
}

crate::api_funcs! {
    (get, list_brands, "/marcas", HttpRequest),
    (get, list_models, "/modelos", web::Query<ListModelsRequest>),
    (get, list_model_years, "/modelo_anos", web::Query<ListModelYearsRequest>),
    (get, get_recommendation, "/recomendacoes", web::Query<RecommendationRequest>),
}

async fn list_brands_impl(
    state: web::Data<AppState>,
    _req: HttpRequest,
) -> ServiceResult<Vec<NamedItem>> {
    use crate::schema::marcas;

    let brands = database::run(&state, |conn| {
        Ok(marcas::table
            .order(marcas::nome.asc())
            .get_results::<BrandData>(conn)?)
    })
    .await?;

    Ok(brands
        .into_iter()
        .map(|data| NamedItem {
            id: data.id,
            nome: data.nome,
        })
        .collect())
}

async fn list_models_impl(
    state: web::Data<AppState>,
    info: web::Query<ListModelsRequest>,
) -> ServiceResult<Vec<NamedItem>> {
    use crate::schema::modelos;

    let marca_id = info.marca_id;
    let models = database::run(&state, move |conn| {
        Ok(modelos::table
            .filter(modelos::marca_id.eq(marca_id))
            .order(modelos::nome.asc())
            .get_results::<VehicleModelData>(conn)?)
    })
    .await?;

    Ok(models
        .into_iter()
        .map(|data| NamedItem {
            id: data.id,
            nome: data.nome,
        })
        .collect())
}

async fn list_model_years_impl(
    state: web::Data<AppState>,
    info: web::Query<ListModelYearsRequest>,
) -> ServiceResult<Vec<ModelYearItem>> {
    use crate::schema::modelo_anos;

    let modelo_id = info.modelo_id;
    let years = database::run(&state, move |conn| {
        Ok(modelo_anos::table
            .filter(modelo_anos::modelo_id.eq(modelo_id))
            .order(modelo_anos::ano.asc())
            .get_results::<ModelYearData>(conn)?)
    })
    .await?;

    Ok(years
        .into_iter()
        .map(|data| ModelYearItem {
            id: data.id,
            ano: data.ano,
        })
        .collect())
}

async fn get_recommendation_impl(
    state: web::Data<AppState>,
    info: web::Query<RecommendationRequest>,
) -> ServiceResult<DataResponse<RecommendationItem>> {
    let rec = find_recommendation(&state, info.modelo_ano_id).await?;
    Ok(DataResponse::ok(rec.into()))
}

/// Recommended oil and filter for a model-year. NotFound when the model-year
/// or its recommendation row doesn't exist.
pub async fn find_recommendation(
    state: &web::Data<AppState>,
    modelo_ano_id: u64,
) -> ServiceResult<Recommendation> {
    use crate::schema::{produtos, recomendacoes};

    assert::assert_model_year(state, modelo_ano_id).await?;

    database::run(state, move |conn| {
        let rec = recomendacoes::table
            .filter(recomendacoes::modelo_ano_id.eq(modelo_ano_id))
            .get_result::<RecommendationData>(conn)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("Nenhuma recomendação para este veículo"))?;

        let ids: Vec<u64> = rec.oleo_id.iter().chain(rec.filtro_id.iter()).copied().collect();
        let products = produtos::table
            .filter(produtos::id.eq_any(ids))
            .get_results::<ProductData>(conn)?;

        let mut recommendation = Recommendation {
            oleo: None,
            filtro: None,
        };
        for product in products {
            if Some(product.id) == rec.oleo_id {
                recommendation.oleo = Some(ProductItem::from(product));
            } else if Some(product.id) == rec.filtro_id {
                recommendation.filtro = Some(ProductItem::from(product));
            }
        }
        Ok(recommendation)
    })
    .await
}
