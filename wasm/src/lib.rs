use wasm_bindgen::prelude::*;

fn js_err(e: nextdate::RuleError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_date(s: &str) -> Result<jiff::civil::Date, JsError> {
    nextdate::date::parse_compact(s).map_err(js_err)
}

/// A parsed repeat rule, usable from JavaScript. Dates cross the boundary as
/// `YYYYMMDD` strings.
#[wasm_bindgen]
pub struct Rule {
    inner: nextdate::Rule,
}

#[wasm_bindgen]
impl Rule {
    /// Parse a repeat rule string.
    #[wasm_bindgen]
    pub fn parse(input: &str) -> Result<Rule, JsError> {
        let inner = nextdate::Rule::parse(input).map_err(js_err)?;
        Ok(Rule { inner })
    }

    /// Get the first date after `now`, counting from `date`.
    pub fn next(&self, now: &str, date: &str) -> Result<String, JsError> {
        let next = self
            .inner
            .next_after(parse_date(now)?, parse_date(date)?)
            .map_err(js_err)?;
        Ok(nextdate::date::format_compact(next))
    }

    /// Get the next N dates as an array of `YYYYMMDD` strings.
    #[wasm_bindgen(js_name = "nextN")]
    pub fn next_n(&self, now: &str, date: &str, n: u32) -> Result<JsValue, JsError> {
        let results = self
            .inner
            .next_n(parse_date(now)?, parse_date(date)?, n as usize)
            .map_err(js_err)?;
        let strings: Vec<String> = results
            .into_iter()
            .map(nextdate::date::format_compact)
            .collect();
        serde_wasm_bindgen::to_value(&strings).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Get the structured JSON representation.
    #[wasm_bindgen(js_name = "toJSON")]
    pub fn to_json(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Get the canonical rule string.
    #[wasm_bindgen(js_name = "toString")]
    pub fn display(&self) -> String {
        self.inner.to_string()
    }

    /// Validate a rule (returns true if valid).
    pub fn validate(input: &str) -> bool {
        nextdate::Rule::validate(input)
    }
}

/// `nextDate(now, date, repeat)` on `YYYYMMDD` strings.
#[wasm_bindgen(js_name = "nextDate")]
pub fn next_date(now: &str, date: &str, repeat: &str) -> Result<String, JsError> {
    nextdate::next_date_compact(now, date, repeat).map_err(js_err)
}

/// Today's date in UTC as `YYYYMMDD`.
#[wasm_bindgen]
pub fn today() -> String {
    let now = jiff::Zoned::now().with_time_zone(jiff::tz::TimeZone::UTC);
    nextdate::date::format_compact(now.date())
}
