//! 内置基础词典
//!
//! 所有网络源都失败且没有有效缓存时使用。修改词表需要重新构建，
//! 每次修改都要递增 `BUILTIN_VERSION`。

use super::mapping::Mapping;

pub const BUILTIN_VERSION: u32 = 1;

const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("Identify", "识别"),
    ("Locate", "定位"),
    ("Find", "找到"),
    ("Determine", "确定"),
    ("space", "空间"),
    ("area", "区域"),
    ("spot", "位置"),
    ("point", "点"),
    ("unoccupied", "未被占用的"),
    ("vacant", "空置的"),
    ("clear", "清晰的"),
    ("white", "白色"),
    ("beige", "米色"),
    ("sink", "水槽"),
    ("wall", "墙"),
    ("floor", "地板"),
    ("mirror", "镜子"),
    ("left", "左"),
    ("right", "右"),
    ("top", "顶部"),
    ("bottom", "底部"),
    ("center", "中心"),
    ("corner", "角落"),
    ("object", "物体"),
    ("person", "人"),
    ("car", "汽车"),
    ("building", "建筑"),
    ("road", "道路"),
    ("tree", "树"),
    ("sky", "天空"),
    ("water", "水"),
    ("food", "食物"),
    ("house", "房子"),
    ("room", "房间"),
    ("door", "门"),
    ("window", "窗户"),
    ("table", "桌子"),
    ("chair", "椅子"),
    ("bed", "床"),
    ("computer", "电脑"),
    ("phone", "手机"),
    ("book", "书"),
    ("paper", "纸"),
    ("time", "时间"),
    ("day", "天"),
    ("night", "夜晚"),
    ("year", "年"),
    ("work", "工作"),
    ("school", "学校"),
    ("home", "家"),
    ("city", "城市"),
];

/// 构建内置基础词典
pub fn builtin_mapping() -> Mapping {
    BUILTIN_ENTRIES.iter().copied().collect()
}
