use serde::{Deserialize, Serialize};

/// 已補全的車輛資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// 0 表示尚未寫入儲存層
    pub id: i64,
    pub reg_num: String,
    pub mark: String,
    pub model: String,
    pub year: i32,
    pub owner_name: String,
    pub owner_surname: String,
    pub owner_patronymic: String,
}

/// 一個車牌查詢工作；`index` 為它在批次中的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTask {
    pub index: usize,
    pub reg_num: String,
}

impl LookupTask {
    pub fn batch(reg_nums: &[String]) -> Vec<LookupTask> {
        reg_nums
            .iter()
            .enumerate()
            .map(|(index, reg_num)| LookupTask {
                index,
                reg_num: reg_num.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarFilter {
    pub reg_num: Option<String>,
    pub mark: Option<String>,
    pub model: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_surname: Option<String>,
    pub owner_patronymic: Option<String>,
    /// 從 1 開始
    pub page: usize,
    pub page_size: usize,
}

impl Default for CarFilter {
    fn default() -> Self {
        Self {
            reg_num: None,
            mark: None,
            model: None,
            year_from: None,
            year_to: None,
            owner_name: None,
            owner_surname: None,
            owner_patronymic: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl CarFilter {
    pub fn matches(&self, car: &Car) -> bool {
        fn eq(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().map_or(true, |e| e == actual)
        }

        eq(&self.reg_num, &car.reg_num)
            && eq(&self.mark, &car.mark)
            && eq(&self.model, &car.model)
            && eq(&self.owner_name, &car.owner_name)
            && eq(&self.owner_surname, &car.owner_surname)
            && eq(&self.owner_patronymic, &car.owner_patronymic)
            && self.year_from.map_or(true, |from| car.year >= from)
            && self.year_to.map_or(true, |to| car.year <= to)
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }
}

/// 以 id 覆寫整筆資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarUpdate {
    pub id: i64,
    pub reg_num: String,
    pub mark: String,
    pub model: String,
    pub year: i32,
    pub owner_name: String,
    pub owner_surname: String,
    pub owner_patronymic: String,
}

impl CarUpdate {
    pub fn into_car(self) -> Car {
        Car {
            id: self.id,
            reg_num: self.reg_num,
            mark: self.mark,
            model: self.model,
            year: self.year,
            owner_name: self.owner_name,
            owner_surname: self.owner_surname,
            owner_patronymic: self.owner_patronymic,
        }
    }
}
