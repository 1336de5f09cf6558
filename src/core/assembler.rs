use crate::domain::model::Car;
use crate::utils::error::{CatalogError, Result};
use serde_json::{Map, Value};

/// 將車輛資訊服務的原始回應轉成 [`Car`]
///
/// 必要欄位缺漏或型別不符時回傳 `MalformedResponse`，不會產生部分填入的資料。
pub fn assemble(doc: &Value) -> Result<Car> {
    let root = doc
        .as_object()
        .ok_or_else(|| CatalogError::malformed("response is not a JSON object"))?;

    let owner = match root.get("owner") {
        Some(Value::Object(owner)) => owner,
        Some(_) => return Err(CatalogError::malformed("field 'owner' is not an object")),
        None => return Err(CatalogError::malformed("missing field 'owner'")),
    };

    Ok(Car {
        id: 0,
        reg_num: required_str(root, "", "regNum")?,
        mark: required_str(root, "", "mark")?,
        model: required_str(root, "", "model")?,
        year: required_year(root)?,
        owner_name: required_str(owner, "owner.", "name")?,
        owner_surname: required_str(owner, "owner.", "surname")?,
        owner_patronymic: required_str(owner, "owner.", "patronymic")?,
    })
}

fn required_str(obj: &Map<String, Value>, prefix: &str, key: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CatalogError::malformed(format!(
            "field '{}{}' is not a string",
            prefix, key
        ))),
        None => Err(CatalogError::malformed(format!(
            "missing field '{}{}'",
            prefix, key
        ))),
    }
}

fn required_year(obj: &Map<String, Value>) -> Result<i32> {
    let raw = match obj.get("year") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| CatalogError::malformed("field 'year' is not representable"))?,
        Some(_) => return Err(CatalogError::malformed("field 'year' is not a number")),
        None => return Err(CatalogError::malformed("missing field 'year'")),
    };

    // 向零截斷
    let truncated = raw.trunc();
    if !truncated.is_finite() || truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
        return Err(CatalogError::malformed(format!(
            "field 'year' is out of range: {}",
            raw
        )));
    }
    Ok(truncated as i32)
}
