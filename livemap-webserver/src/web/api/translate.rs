use super::*;

#[post("/translate", data = "<body>")]
pub async fn post_translate(
    translation: &State<Translation>,
    cfg: &State<Cfg>,
    body: JsonResult<'_, json::TranslateRequest>,
) -> Result<json::TranslateResponse> {
    let json::TranslateRequest { texts, target } = body?.into_inner();
    let target = match target.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(target) => target.parse::<Language>().map_err(usecases::Error::from)?,
        None => cfg.target_lang.clone(),
    };
    let source = cfg.source_lang.clone();
    let translation = translation.0.clone();
    let translated = rocket::tokio::task::spawn_blocking(move || {
        usecases::translate_texts(&*translation, &source, &target, texts)
    })
    .await??;
    Ok(Json(json::TranslateResponse {
        translated: translated
            .into_iter()
            .map(to_json::translated_text)
            .collect(),
    }))
}
