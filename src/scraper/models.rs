use serde::Deserialize;

// Feed envelope
//  ├── Objects: [ { MakelaarId, MakelaarNaam, ... } ]
//  └── Paging
//       ├── AantalPaginas   (total pages)
//       ├── HuidigePagina   (current page)
//       ├── VolgendeUrl     (next page, null on the last one)
//       └── VorigeUrl       (previous page)

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(rename = "Objects")]
    pub objects: Option<Vec<ApiListing>>,
    #[serde(rename = "Paging")]
    pub paging: ApiPaging,
}

#[derive(Debug, Deserialize)]
pub struct ApiListing {
    #[serde(rename = "MakelaarId")]
    pub makelaar_id: i64,
    #[serde(rename = "MakelaarNaam", default)]
    pub makelaar_naam: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPaging {
    #[serde(rename = "AantalPaginas")]
    pub aantal_paginas: u32,
    #[serde(rename = "HuidigePagina")]
    pub huidige_pagina: u32,
    #[serde(rename = "VolgendeUrl")]
    pub volgende_url: Option<String>,
}
