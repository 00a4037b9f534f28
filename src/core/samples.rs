use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_GENERATED_COUNT: usize = 100;

const SURNAMES: &str = "陳林黃張李王吳劉蔡楊許鄭謝郭洪曾邱廖賴周徐蘇葉莊呂江何蕭羅高潘簡朱鍾彭游詹胡施沈余盧梁趙顏柯翁魏孫戴范宋鄧杜侯曹薛傅丁溫紀蔣歐藍連古汪馬董卓程姚";
const GIVEN_FIRST: &str = "怡欣雅婷志豪建宏俊傑淑芬美玲冠宇家豪雅雯志偉詩涵雅惠麗華佩珊秀英建志俊宏文雄宗翰郁婷冠志嘉宏惠君";
const GIVEN_SECOND: &str = "安平樂康大偉光明美麗聰明智慧勇敢誠實善良博學多聞吉祥如意快樂幸福美滿成功勝利希望夢想和平友愛";

/// 範例名單，最後兩個是刻意重複的
pub fn sample_names() -> Vec<String> {
    [
        "陳小明", "林美玲", "張大為", "李佳穎", "王志強",
        "吳淑芬", "劉建宏", "蔡依林", "鄭成功", "黃雅婷",
        "周杰倫", "郭雪芙", "曾國城", "蕭敬騰", "林俊傑",
        "陳零九", "邱鋒澤", "婁峻碩", "賴晏駒", "黃偉晉",
        "孫悟空", "豬八戒", "沙悟淨", "唐三藏", "白骨精",
        "陳小明", "林美玲",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

/// Random three-character names; collisions are possible and left in place.
pub fn generate_names<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let surnames: Vec<char> = SURNAMES.chars().collect();
    let first: Vec<char> = GIVEN_FIRST.chars().collect();
    let second: Vec<char> = GIVEN_SECOND.chars().collect();

    (0..count)
        .filter_map(|_| {
            let s = surnames.choose(rng)?;
            let a = first.choose(rng)?;
            let b = second.choose(rng)?;
            Some(format!("{}{}{}", s, a, b))
        })
        .collect()
}
